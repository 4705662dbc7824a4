//! Composition of archives sharing one mount point.

use crate::archive::{Archive, ReadStream};
use crate::error::{Error, Result};

/// Several archives mounted at the same point, presented as one.
///
/// Members are ordered most-recently-mounted first and never reordered:
/// a new mount shadows older ones, but only for the paths it actually
/// contains. Lookups fall through to the next member on `NotFound`.
pub struct LayeredArchive {
    members: Vec<Box<dyn Archive>>,
}

impl LayeredArchive {
    /// Layer `top` over `bottom`.
    ///
    /// `bottom` may itself be layered; repeated mounts at one point
    /// build a chain where the newest archive always wins.
    pub fn new(top: Box<dyn Archive>, bottom: Box<dyn Archive>) -> Self {
        Self {
            members: vec![top, bottom],
        }
    }
}

impl Archive for LayeredArchive {
    fn open(&self, path: &str) -> Result<ReadStream> {
        for member in &self.members {
            match member.open(path) {
                Err(e) if e.is_not_found() => continue,
                result => return result,
            }
        }

        Err(Error::NotFound(path.to_string()))
    }

    /// Close every member in mount order.
    ///
    /// A failing member does not stop the pass; the remaining members
    /// are still closed and all failures come back aggregated.
    fn close(&mut self) -> Result<()> {
        let mut failures = Vec::new();
        for member in &mut self.members {
            if let Err(e) = member.close() {
                failures.push(e);
            }
        }
        self.members.clear();

        Error::aggregate(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestArchive;
    use std::io::Read;

    #[test]
    fn test_first_member_wins() {
        let layered = LayeredArchive::new(
            Box::new(TestArchive::new().with_file("f.txt", b"top")),
            Box::new(TestArchive::new().with_file("f.txt", b"bottom")),
        );

        let mut data = Vec::new();
        layered.open("f.txt").unwrap().read_to_end(&mut data).unwrap();
        assert_eq!(data, b"top");
    }

    #[test]
    fn test_falls_through_on_not_found() {
        let layered = LayeredArchive::new(
            Box::new(TestArchive::new()),
            Box::new(TestArchive::new().with_file("f.txt", b"bottom")),
        );

        let mut data = Vec::new();
        layered.open("f.txt").unwrap().read_to_end(&mut data).unwrap();
        assert_eq!(data, b"bottom");
    }

    #[test]
    fn test_all_not_found() {
        let layered = LayeredArchive::new(
            Box::new(TestArchive::new()),
            Box::new(TestArchive::new()),
        );

        let err = layered.open("missing").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_real_error_stops_fallthrough() {
        let layered = LayeredArchive::new(
            Box::new(TestArchive::new().with_open_error("f.txt")),
            Box::new(TestArchive::new().with_file("f.txt", b"bottom")),
        );

        // The top member's failure is not NotFound, so the bottom
        // member must never be consulted.
        let err = layered.open("f.txt").err().unwrap();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_close_reaches_every_member() {
        let top = TestArchive::new();
        let bottom = TestArchive::new();
        let (top_closes, bottom_closes) = (top.close_count(), bottom.close_count());

        let mut layered = LayeredArchive::new(Box::new(top), Box::new(bottom));
        layered.close().unwrap();

        assert_eq!(top_closes.get(), 1);
        assert_eq!(bottom_closes.get(), 1);
    }

    #[test]
    fn test_close_continues_past_failure() {
        let top = TestArchive::new().with_close_error();
        let bottom = TestArchive::new();
        let bottom_closes = bottom.close_count();

        let mut layered = LayeredArchive::new(Box::new(top), Box::new(bottom));
        let err = layered.close().unwrap_err();

        assert!(matches!(err, Error::Structural(_)));
        assert_eq!(bottom_closes.get(), 1);
    }
}
