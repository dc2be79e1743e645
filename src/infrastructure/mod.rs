pub mod html_dom;

pub use html_dom::HtmlFragment;
