//! Testing utilities.
//!
//! HTML fixtures with a known amount of main-content text, for exercising the
//! significance threshold without real pages. Pair with
//! [`MockFetcher`](crate::fetchers::MockFetcher).

const FILLER: &str = "lorem ipsum dolor sit amet ";

/// `len` characters of filler text. Words are separated by single spaces and
/// there is no leading or trailing whitespace, so extraction keeps every
/// character.
pub fn text_of_len(len: usize) -> String {
    let mut text: String = FILLER.chars().cycle().take(len).collect();
    if text.ends_with(' ') {
        text.pop();
        text.push('.');
    }
    text
}

/// A full page whose `<main>` holds exactly `len` characters of text, with
/// navigation and footer outside it.
pub fn page_with_main_text(len: usize) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Fixture</title></head><body>\
         <nav>Home About Contact</nav>\
         <main><p>{}</p></main>\
         <footer>Copyright</footer>\
         </body></html>",
        text_of_len(len)
    )
}

/// A page with no region hints, so the whole document is measured.
pub fn page_without_regions(body_text: &str) -> String {
    format!(
        "<html><head><title>Fixture</title></head><body><div>{}</div></body></html>",
        body_text
    )
}
