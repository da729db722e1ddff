use rocket::get;
use rocket::response::content::RawHtml;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Genius Lyrics API</title>
    <style>
        body {
            background: linear-gradient(135deg, #0f2027, #203a43, #2c5364);
            color: white;
            font-family: sans-serif;
            text-align: center;
            padding: 50px;
        }
        p { color: #ddd; }
        code {
            background: rgba(255, 255, 255, 0.1);
            padding: 5px 8px;
            border-radius: 6px;
            color: #00dbde;
        }
        a { color: #00dbde; text-decoration: none; font-weight: bold; }
    </style>
</head>
<body>
    <h1>Genius Lyrics API</h1>
    <p>Search for song lyrics with a single request.</p>
    <p>Example usage:</p>
    <p><code>/api/lyrics?q=Dynasty MIIA</code></p>
    <p>Try it now: <a href="/api/lyrics?q=Dynasty%20MIIA">View Example</a></p>
</body>
</html>
"#;

/// Static landing page with usage help
#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_PAGE)
}
