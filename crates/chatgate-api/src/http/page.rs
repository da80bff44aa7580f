//! The single HTML page of the browser front-end.
//!
//! Plain HTML and a small script that talks to `/api/v1/`. No build step.

use axum::response::Html;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>chatgate</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  .hidden { display: none; }
  .tabs button { margin-right: .5rem; }
  .tabs button.active { font-weight: bold; }
  form { display: flex; flex-direction: column; gap: .5rem; max-width: 320px; }
  #notices div { padding: .4rem .6rem; margin: .3rem 0; border-radius: 4px; }
  .info { background: #e6f4ea; } .warning { background: #fff4e5; } .error { background: #fdecea; }
  #transcript { border: 1px solid #ddd; border-radius: 6px; padding: .5rem; min-height: 240px; margin: 1rem 0; }
  .msg { margin: .5rem 0; white-space: pre-wrap; }
  .msg.user { text-align: right; }
  .msg.assistant .who { color: #0b6bcb; font-weight: bold; }
  .msg.failed { color: #b3261e; }
  #chat-form { flex-direction: row; max-width: none; }
  #chat-form input { flex: 1; }
</style>
</head>
<body>
<h1 id="title">AI Chat</h1>
<div id="notices"></div>

<section id="auth-view" class="hidden">
  <div class="tabs">
    <button id="tab-login" class="active">Login</button>
    <button id="tab-signup">Sign up</button>
  </div>
  <form id="login-form">
    <input name="email" type="email" placeholder="Email" autocomplete="username">
    <input name="password" type="password" placeholder="Password" autocomplete="current-password">
    <button type="submit">Login</button>
  </form>
  <form id="signup-form" class="hidden">
    <input name="email" type="email" placeholder="Email" autocomplete="username">
    <input name="password" type="password" placeholder="Password" autocomplete="new-password">
    <input name="confirm_password" type="password" placeholder="Confirm password" autocomplete="new-password">
    <button type="submit">Sign up</button>
  </form>
</section>

<section id="chat-view" class="hidden">
  <div><span id="who"></span> <button id="logout">Logout</button></div>
  <div id="transcript"></div>
  <form id="chat-form">
    <input name="message" placeholder="Type your message..." autocomplete="off">
    <button type="submit">Send</button>
  </form>
</section>

<script>
const $ = (id) => document.getElementById(id);
let session = null;

async function api(method, path, body) {
  const res = await fetch("/api/v1" + path, {
    method,
    headers: body ? { "content-type": "application/json" } : {},
    body: body ? JSON.stringify(body) : undefined,
  });
  const json = await res.json().catch(() => ({}));
  if (!res.ok) {
    const err = (json.errors && json.errors[0]) || { message: res.statusText };
    throw new Error(err.message);
  }
  return json.data;
}

function notify(notices) {
  const box = $("notices");
  box.innerHTML = "";
  for (const n of notices) {
    const div = document.createElement("div");
    div.className = n.level;
    div.textContent = n.message;
    box.appendChild(div);
  }
}

function addMessage(msg) {
  const div = document.createElement("div");
  div.className = "msg " + msg.role + (msg.kind === "error" ? " failed" : "");
  if (msg.role === "assistant") {
    const who = document.createElement("div");
    who.className = "who";
    who.textContent = session.assistant_name;
    div.appendChild(who);
  }
  div.appendChild(document.createTextNode(msg.content));
  $("transcript").appendChild(div);
  div.scrollIntoView();
}

async function render(next) {
  session = next;
  $("title").textContent = session.title;
  const chat = session.view === "chat";
  $("auth-view").classList.toggle("hidden", chat);
  $("chat-view").classList.toggle("hidden", !chat);
  if (chat) {
    $("who").textContent = session.email || "";
    $("transcript").innerHTML = "";
    addMessage({ role: "assistant", kind: "reply", content: session.welcome_message });
    for (const m of await api("GET", "/messages")) addMessage(m);
  }
}

function showTab(login) {
  $("login-form").classList.toggle("hidden", !login);
  $("signup-form").classList.toggle("hidden", login);
  $("tab-login").classList.toggle("active", login);
  $("tab-signup").classList.toggle("active", !login);
}
$("tab-login").onclick = () => showTab(true);
$("tab-signup").onclick = () => showTab(false);

$("login-form").onsubmit = async (e) => {
  e.preventDefault();
  const f = new FormData(e.target);
  try {
    const data = await api("POST", "/auth/login", { email: f.get("email"), password: f.get("password") });
    notify(data.notices);
    await render(data.session);
  } catch (err) { notify([{ level: "error", message: err.message }]); }
};

$("signup-form").onsubmit = async (e) => {
  e.preventDefault();
  const f = new FormData(e.target);
  try {
    const data = await api("POST", "/auth/signup", Object.fromEntries(f));
    notify(data.notices);
    showTab(true);
  } catch (err) { notify([{ level: "error", message: err.message }]); }
};

$("logout").onclick = async () => {
  const data = await api("POST", "/auth/logout");
  notify(data.notices);
  await render(data.session);
};

$("chat-form").onsubmit = async (e) => {
  e.preventDefault();
  const input = e.target.elements.message;
  const text = input.value.trim();
  if (!text) return;
  input.value = "";
  try {
    const data = await api("POST", "/chat", { message: text });
    for (const m of data.messages) addMessage(m);
    if (data.error) notify([{ level: "error", message: data.error.message }]);
  } catch (err) { notify([{ level: "error", message: err.message }]); }
};

api("GET", "/session").then(render).catch((err) => notify([{ level: "error", message: err.message }]));
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_uses_api_routes() {
        for route in ["/session", "/auth/login", "/auth/signup", "/auth/logout", "/messages", "/chat"] {
            assert!(INDEX_HTML.contains(&format!("\"{route}\"")), "page does not call {route}");
        }
    }
}
