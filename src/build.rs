mod article;
mod assets;
mod builder;
mod front_matter;
mod highlight;
mod index;
mod markdown;
mod pipeline;
mod render;
mod scaffold;
mod source;

pub use builder::Builder;
pub use scaffold::write_default_templates;
