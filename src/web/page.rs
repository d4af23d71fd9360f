use uuid::Uuid;

const SESSION_PLACEHOLDER: &str = "{{SESSION_ID}}";

const PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Talk to Mia | Silk &amp; Strand</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; background: #fbf7f4; color: #2b2b2b; }
  h1 { text-align: center; font-weight: 600; }
  #avatar { display: block; width: 140px; margin: 0 auto 1.5rem; animation: float 3s ease-in-out infinite; }
  @keyframes float { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-12px); } }
  #chat { min-height: 220px; border: 1px solid #e5ddd7; border-radius: 12px; padding: 1rem; background: #fff; display: flex; flex-direction: column; gap: .5rem; }
  .bubble { padding: .6rem .9rem; border-radius: 14px; max-width: 80%; white-space: pre-wrap; }
  .user { align-self: flex-end; background: #e0ecff; }
  .assistant { align-self: flex-start; background: #f3e6f5; }
  #controls { text-align: center; margin: 1.2rem 0; }
  #record { font-size: 1.1rem; padding: .7rem 1.4rem; border-radius: 999px; border: none; background: #b05b8c; color: #fff; cursor: pointer; }
  #record.recording { background: #d13b3b; }
  #record:disabled { opacity: .6; cursor: wait; }
  #status { min-height: 1.4em; color: #7a6f69; }
  #warning { color: #a04000; font-weight: 600; }
</style>
</head>
<body>
<h1>Talk to Mia, your hair-care concierge</h1>
<img id="avatar" src="/avatar.svg" alt="Mia">
<div id="chat"></div>
<div id="controls">
  <label for="record">Tell Mia about your hair</label><br><br>
  <button id="record" type="button">Start recording</button>
  <p id="status"></p>
  <p id="warning"></p>
</div>
<div id="playback"></div>
<script>
const SESSION_ID = "{{SESSION_ID}}";
const chat = document.getElementById("chat");
const button = document.getElementById("record");
const statusLine = document.getElementById("status");
const warning = document.getElementById("warning");
const playback = document.getElementById("playback");
let recorder = null;
let chunks = [];

function renderMessages(messages) {
  chat.replaceChildren(...messages.map((m) => {
    const bubble = document.createElement("div");
    bubble.className = "bubble " + m.role;
    bubble.textContent = m.content;
    return bubble;
  }));
}

async function submit(blob) {
  button.disabled = true;
  statusLine.textContent = "Mia is thinking...";
  try {
    const resp = await fetch("/api/voice", {
      method: "POST",
      headers: { "x-session-id": SESSION_ID, "content-type": blob.type || "application/octet-stream" },
      body: blob,
    });
    const data = await resp.json();
    if (!resp.ok) {
      statusLine.textContent = "Something went wrong: " + data.error.message;
      return;
    }
    if (data.status === "limit_reached") {
      warning.textContent = data.warning;
      button.disabled = true;
      statusLine.textContent = "";
      return;
    }
    renderMessages(data.messages);
    playback.innerHTML = data.audio_html;
    statusLine.textContent = "";
  } catch (err) {
    statusLine.textContent = "Something went wrong: " + err;
  } finally {
    if (!warning.textContent) button.disabled = false;
  }
}

button.addEventListener("click", async () => {
  if (recorder && recorder.state === "recording") {
    recorder.stop();
    return;
  }
  const stream = await navigator.mediaDevices.getUserMedia({ audio: true });
  recorder = new MediaRecorder(stream);
  chunks = [];
  recorder.ondataavailable = (e) => chunks.push(e.data);
  recorder.onstop = () => {
    stream.getTracks().forEach((t) => t.stop());
    button.classList.remove("recording");
    button.textContent = "Start recording";
    submit(new Blob(chunks, { type: recorder.mimeType }));
  };
  recorder.start();
  button.classList.add("recording");
  button.textContent = "Stop and send";
});

fetch("/api/session", { headers: { "x-session-id": SESSION_ID } })
  .then((r) => r.json())
  .then((data) => renderMessages(data.messages || []));
</script>
</body>
</html>
"##;

pub const AVATAR_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 120">
<circle cx="60" cy="60" r="58" fill="#f3e6f5"/>
<path d="M22 70 Q20 20 60 18 Q100 20 98 70 Q92 40 60 38 Q28 40 22 70Z" fill="#6b3a2e"/>
<circle cx="60" cy="66" r="30" fill="#f6d2b8"/>
<circle cx="49" cy="62" r="3.5" fill="#2b2b2b"/>
<circle cx="71" cy="62" r="3.5" fill="#2b2b2b"/>
<path d="M49 76 Q60 86 71 76" stroke="#b05b8c" stroke-width="3" fill="none" stroke-linecap="round"/>
</svg>
"##;

pub fn render(session_id: Uuid) -> String {
    PAGE.replace(SESSION_PLACEHOLDER, &session_id.to_string())
}
