//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use ariadne::{Color, Report};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::Rgb(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns `self` as [`Any`], so callers can recover the concrete error kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind, Source};
    use super::*;

    #[derive(Debug)]
    struct Unknown;

    impl ErrorKind for Unknown {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message("unknown thing")
                .with_label(Label::new((src_id, spans[0].clone())).with_message("this one"))
                .finish()
        }
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], Unknown);
        assert!(err.is::<Unknown>());
        assert!(err.downcast_ref::<Unknown>().is_some());
    }

    #[test]
    fn report_mentions_message() {
        let err = Error::new(vec![2..3], Unknown);
        let mut out = Vec::new();
        err.build_report("input")
            .write(("input", Source::from("A + ?")), &mut out)
            .unwrap();

        let plain = String::from_utf8(strip_ansi_escapes::strip(out)).unwrap();
        assert!(plain.contains("unknown thing"));
        assert!(plain.contains("this one"));
    }
}
