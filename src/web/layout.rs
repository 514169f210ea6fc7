//! Document shell shared by every page

use axum::response::Html;

const STYLE: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f9fafb;color:#1f2937;line-height:1.6}
a{color:#2563eb;text-decoration:none}
a:hover{text-decoration:underline}
nav{position:sticky;top:0;background:rgba(255,255,255,.95);border-bottom:1px solid #e5e7eb;padding:14px 32px;display:flex;align-items:center;gap:24px;z-index:10}
nav .logo{font-weight:700;font-size:20px;background:linear-gradient(90deg,#2563eb,#7c3aed);-webkit-background-clip:text;color:transparent;margin-right:auto}
nav a{color:#374151;font-size:14px}
section{max-width:1100px;margin:0 auto;padding:72px 32px}
h1{font-size:44px;line-height:1.15}
h2{font-size:32px;margin-bottom:8px;text-align:center}
h3{font-size:18px;margin-bottom:6px}
.lead{color:#4b5563;text-align:center;max-width:680px;margin:0 auto 40px}
.gradient{background:linear-gradient(90deg,#2563eb,#7c3aed);-webkit-background-clip:text;color:transparent}
.hero{text-align:center;padding-top:110px}
.hero .title{font-size:22px;color:#4b5563;margin:12px 0}
.hero .tagline{max-width:680px;margin:0 auto 28px;color:#4b5563}
.btn{display:inline-block;padding:12px 26px;border-radius:10px;font-weight:600;border:0;cursor:pointer;font-size:15px}
.btn-primary{background:linear-gradient(90deg,#2563eb,#7c3aed);color:#fff}
.btn-outline{border:2px solid #2563eb;color:#2563eb;background:#fff}
.btn[disabled]{opacity:.5;cursor:not-allowed}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(240px,1fr));gap:20px}
.card{background:#fff;border:1px solid #e5e7eb;border-radius:14px;padding:22px}
.stat{text-align:center}
.stat .value{font-size:30px;font-weight:700}
.stat .label{color:#6b7280;font-size:14px}
.tag{display:inline-block;background:#eef2ff;color:#4338ca;border-radius:999px;padding:3px 10px;font-size:12px;margin:3px 3px 0 0}
ul.features{margin:10px 0 10px 18px;color:#4b5563;font-size:14px}
.dots span{display:inline-block;width:10px;height:10px;border-radius:50%;background:#e5e7eb;margin-right:4px}
.dots span.on{background:#7c3aed}
form .row{display:grid;grid-template-columns:1fr 1fr;gap:14px}
label{display:block;font-size:14px;font-weight:600;margin:12px 0 4px}
input,textarea{width:100%;padding:10px 12px;border:1px solid #d1d5db;border-radius:8px;font:inherit}
input[disabled],textarea[disabled]{background:#f3f4f6}
.banner{border-radius:10px;padding:12px 16px;margin:12px 0;font-size:14px}
.banner.error{background:#fef2f2;border:1px solid #fecaca;color:#b91c1c}
.sent{text-align:center;padding:40px 20px}
.sent h3{font-size:24px;color:#059669}
.badge{display:inline-block;border-radius:999px;padding:2px 10px;font-size:12px;font-weight:600}
.badge.read{background:#ecfdf5;color:#047857}
.badge.unread{background:#eff6ff;color:#1d4ed8}
.message.unread{border-left:4px solid #2563eb}
.meta{color:#6b7280;font-size:13px}
.spinner{width:40px;height:40px;border:4px solid #e5e7eb;border-top-color:#2563eb;border-radius:50%;margin:80px auto}
footer{background:#111827;color:#d1d5db;padding:48px 32px;text-align:center;font-size:14px}
footer a{color:#93c5fd;margin:0 8px}
"#;

/// Wrap a page body in the full HTML document
pub fn document(title: &str, head_extra: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head_extra}
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
    ))
}

/// Escape text for element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
