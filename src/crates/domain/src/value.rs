use std::fmt::{self, Display};

// Helper macro to define aggregate ID newtypes and common trait impls
macro_rules! define_id {
    ($name:ident $(, $extra:ident)*) => {
        #[derive(Debug, Clone, PartialEq $(, $extra)*)]
        pub struct $name(i64);

        impl $name {
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(UserId, Eq, Hash);
define_id!(RatingId);
define_id!(CommentId, Eq, Hash, Copy);
define_id!(CommentLikeId);
define_id!(NotificationId, Eq, Hash, Copy);

/// 可评分、可评论的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Song,
    Single,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Song => "song",
            ResourceKind::Single => "single",
        }
    }

    /// URL 路径中的复数形式（songs / singles）
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "songs" => Some(ResourceKind::Song),
            "singles" => Some(ResourceKind::Single),
            _ => None,
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResourceKind> for String {
    fn from(value: ResourceKind) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = String;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "song" => Ok(ResourceKind::Song),
            "single" => Ok(ResourceKind::Single),
            _ => Err(format!("invalid value:{}", value)),
        }
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ResourceKind::try_from(value.as_str())
    }
}

/// 资源定位：类型 + 目录中的字符串主键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: &str) -> Self {
        Self {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
