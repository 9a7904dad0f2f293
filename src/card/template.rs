/// Stylesheet embedded in every recipe card.
///
/// Kept in `card.css` and loaded at compile time so the generated document
/// never references anything over the network.
const CARD_STYLE: &str = include_str!("card.css");

/// Markup of the print trigger placed above and below the card content.
pub const PRINT_BUTTON: &str =
    r#"<button class="print-button" onclick="window.print()">🖨️ Print Recipe Card</button>"#;

/// Wrap rendered card content in a standalone, printable HTML document.
pub(crate) fn wrap_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>Recipe Card</title>\n\
         <style>\n{CARD_STYLE}</style>\n\
         </head>\n\
         <body>\n\
         {PRINT_BUTTON}\n\
         {body}\n\
         {PRINT_BUTTON}\n\
         </body>\n\
         </html>\n"
    )
}
