use reqwest::header::HeaderValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedImageObject {
    pub mime_type: HeaderValue,
    pub image: Vec<u8>,
}

impl CachedImageObject {
    pub fn new(mime_type: HeaderValue, image: Vec<u8>) -> Self {
        Self { mime_type, image }
    }

    /// Cost charged against the memory store's byte budget
    pub fn cost(&self) -> usize {
        self.image.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_is_payload_length() {
        let object = CachedImageObject::new(HeaderValue::from_static("image/png"), vec![0u8; 42]);

        assert_eq!(object.cost(), 42);
    }
}
