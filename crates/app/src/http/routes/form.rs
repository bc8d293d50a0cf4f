use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>YouTube Comments Downloader</title></head>
<body>
<h1>YouTube Comments Downloader</h1>
<form method="get" action="/v1/comments.docx">
  <label for="url">Enter YouTube video URL:</label>
  <input id="url" name="url" type="url" size="60" required>
  <button type="submit">Download comments as DOCX</button>
</form>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
