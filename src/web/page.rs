//! The single chat page. Inline HTML/CSS/JS: history with role-based
//! styling, a send form, a voice toggle, a reset button, and a client-side
//! typing animation for the assistant reply.

pub const CHAT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Valet</title>
<style>
  :root { color-scheme: dark; }
  body {
    margin: 0; background: #14161a; color: #e8e6e3;
    font-family: system-ui, -apple-system, sans-serif;
    display: flex; flex-direction: column; height: 100vh;
  }
  header {
    padding: 0.8rem 1.2rem; border-bottom: 1px solid #2a2d33;
    display: flex; align-items: baseline; gap: 1rem;
  }
  header h1 { margin: 0; font-size: 1.1rem; }
  header .sub { color: #8a8f98; font-size: 0.85rem; }
  #chat { flex: 1; overflow-y: auto; padding: 1rem 1.2rem; }
  .turn { margin: 0.5rem 0; max-width: 46rem; line-height: 1.45; white-space: pre-wrap; }
  .turn .who { font-weight: 600; margin-right: 0.4rem; }
  .turn.user .who { color: #7aa2f7; }
  .turn.assistant .who { color: #9ece6a; }
  #error {
    display: none; margin: 0 1.2rem 0.5rem; padding: 0.5rem 0.8rem;
    background: #3b1f24; color: #f7768e; border-radius: 6px; font-size: 0.9rem;
  }
  form {
    display: flex; gap: 0.6rem; padding: 0.8rem 1.2rem 1rem;
    border-top: 1px solid #2a2d33; align-items: center;
  }
  #message {
    flex: 1; padding: 0.55rem 0.8rem; border-radius: 6px;
    border: 1px solid #2a2d33; background: #1c1f24; color: inherit; font-size: 1rem;
  }
  button {
    padding: 0.55rem 1rem; border-radius: 6px; border: none;
    background: #7aa2f7; color: #14161a; font-weight: 600; cursor: pointer;
  }
  button:disabled { opacity: 0.5; cursor: default; }
  button.secondary { background: #2a2d33; color: #e8e6e3; }
  label { font-size: 0.85rem; color: #8a8f98; white-space: nowrap; }
</style>
</head>
<body>
<header>
  <h1>Valet</h1>
  <span class="sub">your personal butler</span>
</header>
<div id="chat"></div>
<div id="error"></div>
<form id="form">
  <input id="message" autocomplete="off" placeholder="Ask your butler..." autofocus>
  <label><input type="checkbox" id="speak"> voice</label>
  <button id="send" type="submit">Send</button>
  <button id="reset" type="button" class="secondary">Reset</button>
</form>
<script>
const chat = document.getElementById('chat');
const form = document.getElementById('form');
const input = document.getElementById('message');
const speak = document.getElementById('speak');
const sendBtn = document.getElementById('send');
const resetBtn = document.getElementById('reset');
const errorBox = document.getElementById('error');

function addTurn(role, text) {
  const div = document.createElement('div');
  div.className = 'turn ' + role;
  const who = document.createElement('span');
  who.className = 'who';
  who.textContent = role === 'user' ? 'You:' : 'Valet:';
  const body = document.createElement('span');
  body.textContent = text;
  div.append(who, body);
  chat.append(div);
  chat.scrollTop = chat.scrollHeight;
  return body;
}

function typeOut(role, text) {
  const body = addTurn(role, '');
  let i = 0;
  const timer = setInterval(() => {
    body.textContent = text.slice(0, ++i);
    chat.scrollTop = chat.scrollHeight;
    if (i >= text.length) clearInterval(timer);
  }, 15);
}

function showError(message) {
  errorBox.textContent = message;
  errorBox.style.display = 'block';
}

function clearError() {
  errorBox.style.display = 'none';
}

async function loadHistory() {
  const res = await fetch('/api/history');
  if (!res.ok) return;
  chat.replaceChildren();
  for (const turn of await res.json()) addTurn(turn.role, turn.text);
}

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const message = input.value.trim();
  if (!message) return;
  clearError();
  addTurn('user', message);
  input.value = '';
  sendBtn.disabled = true;
  try {
    const res = await fetch('/api/chat', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ message, speak: speak.checked }),
    });
    const body = await res.json();
    if (res.ok) {
      typeOut('assistant', body.reply);
    } else {
      showError(body.error || 'Something went wrong.');
    }
  } catch (e) {
    showError('Could not reach the server.');
  } finally {
    sendBtn.disabled = false;
    input.focus();
  }
});

resetBtn.addEventListener('click', async () => {
  clearError();
  const res = await fetch('/api/reset', { method: 'POST' });
  if (res.ok) {
    chat.replaceChildren();
  } else {
    const body = await res.json().catch(() => ({}));
    showError(body.error || 'Reset failed.');
  }
});

loadHistory();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_expected_hooks() {
        assert!(CHAT_PAGE.contains("/api/chat"));
        assert!(CHAT_PAGE.contains("/api/history"));
        assert!(CHAT_PAGE.contains("/api/reset"));
        assert!(CHAT_PAGE.contains("id=\"speak\""));
    }
}
