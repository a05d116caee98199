use serde::Deserialize;

/// Something a comment can be posted against.
pub trait CommentTarget: Send + Sync {
    /// Short label used in error messages.
    fn kind(&self) -> &str;

    /// Site-relative link to the object, or `None` when this kind of object
    /// has no permalink the spam service can use.
    fn permalink_path(&self) -> Option<String>;
}

/// Objects the host hands over as comment receivers.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentObject {
    Image { link: String },
    Album { name: String },
    Page { title: String },
}

impl CommentTarget for ContentObject {
    fn kind(&self) -> &str {
        match self {
            ContentObject::Image { .. } => "image",
            ContentObject::Album { .. } => "album",
            ContentObject::Page { .. } => "page",
        }
    }

    fn permalink_path(&self) -> Option<String> {
        match self {
            ContentObject::Image { link } => Some(link.clone()),
            // only image links are resolvable for now
            ContentObject::Album { .. } | ContentObject::Page { .. } => None,
        }
    }
}
