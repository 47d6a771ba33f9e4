use std::path::PathBuf;

use snafu::{Location, Snafu};
use tokio_util::codec::LinesCodecError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to open input file '{}'", path.display()))]
    OpenInput {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to create output file '{}'", path.display()))]
    CreateOutput {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to read from the input stream"))]
    ReadLine {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: LinesCodecError,
    },
    #[snafu(display("Failed to write to the output sink"))]
    WriteOutput {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Result channel closed unexpectedly"))]
    ResultChannelClosed {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("A pipeline task panicked or was aborted"))]
    TaskJoin {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio::task::JoinError,
    },
}
