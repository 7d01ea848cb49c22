use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Movie {
    id: Uuid,
    title: String,
    image_url: String,
    rating: f32,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1})", self.title, self.rating)
    }
}

impl Movie {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>, rating: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            image_url: image_url.into(),
            rating,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }
}
