use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{FromRawFd, OwnedFd};
use std::process::{Command, Stdio};

use crate::types::Error;

/// Executes the `ipset` utility. The facade only talks to `ipset` through this trait.
pub trait Runner {
    /// Run the utility with `args`, return the combined stdout and stderr output
    /// on success, or `Error::Cmd` carrying the same output on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String, Error>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, args: &[&str]) -> Result<String, Error> {
        (**self).run(args)
    }
}

impl<R: Runner + ?Sized> Runner for Box<R> {
    fn run(&self, args: &[&str]) -> Result<String, Error> {
        (**self).run(args)
    }
}

/// Runs the utility as a child process, blocking until it exits.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: OsString,
}

impl CommandRunner {
    /// `program` is resolved through `PATH` unless it contains a slash.
    pub fn new(program: impl Into<OsString>) -> CommandRunner {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        CommandRunner::new("ipset")
    }
}

impl Runner for CommandRunner {
    fn run(&self, args: &[&str]) -> Result<String, Error> {
        let (mut reader, writer) = pipe()?;
        // the command holds the write end, it must be gone before reading to EOF
        let mut child = {
            let mut command = Command::new(&self.program);
            command
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::from(writer.try_clone()?))
                .stderr(Stdio::from(writer));
            command.spawn()?
        };

        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = child.wait()?;
        read?;

        let output = String::from_utf8_lossy(&output).into_owned();
        if status.success() {
            Ok(output)
        } else {
            Err(Error::Cmd(output))
        }
    }
}

/// A close-on-exec pipe, returned as (read end, write end).
fn pipe() -> io::Result<(File, OwnedFd)> {
    let mut fds: [libc::c_int; 2] = [-1; 2];
    unsafe {
        if libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok((File::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])))
    }
}
