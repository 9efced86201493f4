use axum::response::Html;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Nokia Snake Game</title></head>
<body>
<h1>Nokia Snake Game</h1>
<p>Welcome to the classic Snake game!</p>
<a href="/game">Play Game</a>
</body>
</html>
"#;

const GAME_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Nokia Snake</title>
<style>
body { background: #000; color: #9c0; font-family: monospace; text-align: center; }
canvas { background: #9c0; image-rendering: pixelated; border: 4px solid #333; }
</style>
</head>
<body>
<h1>SNAKE</h1>
<div>Score: <span id="score">0</span> &middot; High score: <span id="best">0</span></div>
<canvas id="gameCanvas" width="200" height="200"></canvas>
<div id="status">Press space to start</div>
<p>Use the arrow keys or WASD to steer, space to start or restart.</p>
<script>
const cell = 10;
const canvas = document.getElementById("gameCanvas");
const ctx = canvas.getContext("2d");
const keys = { ArrowUp: "up", ArrowDown: "down", ArrowLeft: "left", ArrowRight: "right",
               w: "up", s: "down", a: "left", d: "right" };
let sessionId = null;
let gameState = "ready";
let timer = null;

async function call(method, path, body) {
  const response = await fetch(path, {
    method,
    headers: body ? { "Content-Type": "application/json" } : {},
    body: body ? JSON.stringify(body) : undefined,
  });
  return response.json();
}

function draw(snapshot) {
  gameState = snapshot.state;
  ctx.fillStyle = "#9c0";
  ctx.fillRect(0, 0, canvas.width, canvas.height);
  ctx.fillStyle = "#000";
  for (const [x, y] of snapshot.snake) ctx.fillRect(x * cell, y * cell, cell - 1, cell - 1);
  if (snapshot.food) ctx.fillRect(snapshot.food[0] * cell + 2, snapshot.food[1] * cell + 2, cell - 5, cell - 5);
  document.getElementById("score").textContent = snapshot.score;
  document.getElementById("best").textContent = snapshot.high_score;
  document.getElementById("status").textContent =
    gameState === "game_over" ? "Game over - press space" : gameState === "playing" ? "" : "Press space to start";
  if (gameState === "game_over" && timer) { clearInterval(timer); timer = null; }
}

async function tick() { draw(await call("POST", `/api/game/${sessionId}/update`)); }

document.addEventListener("keydown", async (event) => {
  if (event.key === " ") {
    event.preventDefault();
    if (gameState === "game_over") draw(await call("POST", `/api/game/${sessionId}/restart`));
    await call("POST", `/api/game/${sessionId}/start`);
    if (!timer) timer = setInterval(tick, 250);
  } else if (keys[event.key]) {
    event.preventDefault();
    await call("POST", `/api/game/${sessionId}/move`, { direction: keys[event.key] });
  }
});

call("POST", "/api/game/new").then((snapshot) => { sessionId = snapshot.session_id; draw(snapshot); });
</script>
</body>
</html>
"##;

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub async fn game() -> Html<&'static str> {
    Html(GAME_PAGE)
}
