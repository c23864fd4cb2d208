pub mod descriptor;
pub mod popup;
pub mod rules;
pub mod scheme;
pub mod styler;
