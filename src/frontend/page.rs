use indoc::formatdoc;

// Keeps the newest message in view. The chat box gets its first epoch before
// it is attached, so attaching it (a child list change) scrolls as well.
const SCROLL_FOLLOW: &str = r#"<script>
    new MutationObserver(() => {
        const box = document.getElementById("t2m__chat-box");
        if (box) {
            box.scrollTop = box.scrollHeight;
        }
    }).observe(document.body, {
        subtree: true,
        childList: true,
        attributes: true,
        attributeFilter: ["data-scroll-epoch"],
    });
</script>"#;

/// The HTML shell the liveview connects from.
pub fn host_page(title: &str, ws_url: &str) -> String {
    formatdoc!(
        r#"
        <!DOCTYPE html>
        <html>
            <head>
                <title>{title}</title>
                <meta name="viewport"
                content="width=device-width,
                initial-scale=1,
                minimum-scale=1,
                maximum-scale=1,
                user-scalable=no">
            </head>
            <body>
                <div id="main"></div>
                {follow}
            </body>
            {glue}
        </html>
        "#,
        title = title,
        follow = SCROLL_FOLLOW,
        glue = dioxus_liveview::interpreter_glue(ws_url),
    )
}
