//! Icon markup shared by dialog, poster and notification cards

use astn_host::{Host, HostError};

use crate::dom::child_with_class;

/// Which icon a widget renders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Icon<'a> {
    /// Font-Awesome glyph name, without the `fa-` prefix
    Font(&'a str),
    /// Image URL
    Image(&'a str),
    None,
}

impl<'a> Icon<'a> {
    /// A Font-Awesome name wins over the image; the image needs `show_image`
    pub fn choose(fa: &'a str, show_image: bool, image: &'a str) -> Self {
        if !fa.is_empty() {
            Icon::Font(fa)
        } else if show_image {
            Icon::Image(image)
        } else {
            Icon::None
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Icon::None)
    }

    /// Render into an already created icon container
    ///
    /// `size` scales the glyph font or bounds the image.
    pub fn render<H: Host>(
        &self,
        host: &mut H,
        container: &H::Node,
        size: Option<&str>,
    ) -> Result<(), HostError> {
        match *self {
            Icon::Font(name) => {
                child_with_class(host, container, "i", &format!("fa fa-{}", name))?;
                if let Some(size) = size {
                    host.set_style(container, "font-size", Some(size));
                }
            }
            Icon::Image(src) => {
                let img = host.create_element("img")?;
                host.set_attribute(&img, "src", src);
                if let Some(size) = size {
                    host.set_style(&img, "max-width", Some(size));
                    host.set_style(&img, "max-height", Some(size));
                }
                host.append_child(container, &img)?;
            }
            Icon::None => {}
        }
        Ok(())
    }
}
