//! Per-kind HTML writers. Each file extends [`HtmlWriter`](super::HtmlWriter)
//! with the `write_*` methods its `NodeHandler` impl dispatches to.

mod blocks;
mod embed;
mod inline;
mod media;
