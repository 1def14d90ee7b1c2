//! Built-in block handlers, one per file.

mod button;
mod countdown;
mod divider;
mod heading;
mod hero;
mod html;
mod image;
mod menu;
mod social;
mod spacer;
mod text;
mod video;

pub use button::ButtonHandler;
pub use countdown::CountdownHandler;
pub use divider::DividerHandler;
pub use heading::HeadingHandler;
pub use hero::HeroHandler;
pub use html::RawHtmlHandler;
pub use image::ImageHandler;
pub use menu::MenuHandler;
pub use social::SocialHandler;
pub use spacer::SpacerHandler;
pub use text::TextHandler;
pub use video::VideoHandler;

use crate::registry::BlockHandler;

pub(crate) fn builtin_handlers() -> Vec<Box<dyn BlockHandler>> {
    vec![
        Box::new(TextHandler),
        Box::new(HeadingHandler),
        Box::new(ButtonHandler),
        Box::new(ImageHandler),
        Box::new(DividerHandler),
        Box::new(SpacerHandler),
        Box::new(SocialHandler),
        Box::new(RawHtmlHandler),
        Box::new(VideoHandler),
        Box::new(CountdownHandler),
        Box::new(MenuHandler),
        Box::new(HeroHandler),
    ]
}
