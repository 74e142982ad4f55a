//! Interactive documentation page

/// Swagger UI release loaded from the public CDN
pub const SWAGGER_UI_VERSION: &str = "5.11.0";

/// HTML page rendering the document served at `spec_url`.
pub fn swagger_ui_html(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        title = title,
        version = SWAGGER_UI_VERSION,
        spec_url = spec_url,
    )
}
