use ariadne::Source;
use boolsimp_engine::CatalogError;
use boolsimp_error::Error as ParseError;

/// Utility enum to package errors that can occur while simplifying.
#[derive(Debug)]
pub enum Error {
    /// The input is not a valid expression.
    Parse(ParseError),

    /// The built-in laws could not be loaded.
    Catalog(CatalogError),
}

impl Error {
    /// Report this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    ///
    /// [`Report`]: ariadne::Report
    pub fn report_to_stderr(&self, input: &str) {
        let result = match self {
            Self::Parse(err) => err.build_report("input").eprint(("input", Source::from(input))),
            Self::Catalog(err) => {
                eprintln!("{}", err);
                err.error.build_report("rule").eprint(("rule", Source::from(err.source)))
            },
        };

        if let Err(err) = result {
            log::error!("could not print report: {}", err);
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}
