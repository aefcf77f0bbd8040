use super::{escape, layout};
use shortly_redirector::RedirectState;

/// Page shown when a visit does not end in a redirect.
pub fn redirect_page(code: &str, state: &RedirectState) -> String {
    let body = format!(
        "<h1>{message}</h1>\n<p class=\"muted\">Shortcode: <code>{code}</code></p>\n\
         <p><a href=\"/\">Create a new short link</a></p>",
        message = escape(state.message()),
        code = escape(code),
    );
    layout(state.message(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_state_message_and_link_home() {
        let page = redirect_page("gone12", &RedirectState::Expired);
        assert!(page.contains("<h1>Short link has expired.</h1>"));
        assert!(page.contains("<code>gone12</code>"));
        assert!(page.contains("href=\"/\""));
    }
}
