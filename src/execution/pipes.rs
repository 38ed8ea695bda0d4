use std::io;
use std::os::fd::OwnedFd;

use nix::fcntl::OFlag;
use nix::unistd::pipe2;

use crate::error::{ErrorKind, ShellError, ShellResult};

/// Read/write ends of one pipe between adjacent stages.
///
/// Each end is handed out at most once; whatever is still held when the pair
/// drops is closed then. Both ends are close-on-exec, so only the copy a child
/// duplicates onto its stdin/stdout outlives `exec`.
#[derive(Debug)]
pub(crate) struct PipePair {
    read: Option<OwnedFd>,
    write: Option<OwnedFd>,
}

impl PipePair {
    pub(crate) fn open() -> ShellResult<Self> {
        let (read, write) = pipe2(OFlag::O_CLOEXEC).map_err(|errno| {
            let err = io::Error::from(errno);
            ShellError::new(ErrorKind::Resource, format!("pipe: {err}")).with_io_kind(err.kind())
        })?;
        Ok(Self {
            read: Some(read),
            write: Some(write),
        })
    }

    pub(crate) fn take_read(&mut self) -> Option<OwnedFd> {
        self.read.take()
    }

    pub(crate) fn take_write(&mut self) -> Option<OwnedFd> {
        self.write.take()
    }
}

/// Allocate `count` pipes up front. On failure the pairs already created are
/// dropped, closing their descriptors.
pub(crate) fn open_pipes(count: usize) -> ShellResult<Vec<PipePair>> {
    let mut pipes = Vec::with_capacity(count);
    for _ in 0..count {
        pipes.push(PipePair::open()?);
    }
    Ok(pipes)
}
