use crate::models::ImageUpload;

use std::collections::VecDeque;

use nanoid::nanoid;

pub const PENDING_UPLOADS_CAPACITY: usize = 32;

/// Images picked in a form whose submission has not gone through yet.
///
/// Oldest attachments are dropped once the store is full.
#[derive(Debug)]
pub struct PendingUploads {
    capacity: usize,
    entries: VecDeque<(String, ImageUpload)>,
}

impl Default for PendingUploads {
    fn default() -> Self {
        return Self::with_capacity(PENDING_UPLOADS_CAPACITY);
    }
}

impl PendingUploads {
    pub fn with_capacity(capacity: usize) -> Self {
        return Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        };
    }

    pub fn stash(&mut self, upload: ImageUpload) -> String {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        let key = nanoid!();
        self.entries.push_back((key.clone(), upload));
        return key;
    }

    pub fn get(&self, key: &str) -> Option<&ImageUpload> {
        return self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, upload)| upload);
    }

    pub fn remove(&mut self, key: &str) -> Option<ImageUpload> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        return self.entries.remove(index).map(|(_, upload)| upload);
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
