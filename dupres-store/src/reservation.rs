use dupres_base::Digest;

/// A lease on a partition that pins its storage tree while held. Acquired
/// by digest, released on every exit path via `Drop` — the core never has
/// to remember to call a release function on an error branch.
pub struct Reservation {
    digest: Digest,
    release: Option<Box<dyn FnOnce(Digest) + Send>>,
}

impl Reservation {
    pub fn new(digest: Digest, release: impl FnOnce(Digest) + Send + 'static) -> Self {
        Reservation {
            digest,
            release: Some(Box::new(release)),
        }
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.digest);
        }
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation").field("digest", &self.digest).finish()
    }
}
