mod executor;

use crate::{
    core::{commands::Builtins, commands::Flow, ShellState},
    error::ShellError,
    flags::Flags,
    input::{self, LineReader},
    process::{BackgroundJobs, ProcessExecutor, SignalManager},
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) reader: LineReader,
    pub(crate) state: ShellState,
    pub(crate) builtins: Builtins,
    pub(crate) executor: ProcessExecutor,
    pub(crate) jobs: BackgroundJobs,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        Ok(Shell {
            reader: LineReader::new()?,
            state: ShellState::new(),
            builtins: Builtins::new(),
            executor: ProcessExecutor::new(),
            jobs: BackgroundJobs::new(),
            flags,
        })
    }

    /// Run the read loop until `exit`, end of input, or a fatal error.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let _signals = SignalManager::install(self.state.mode_flag())?;

        let result = self.command_loop();
        if !self.jobs.is_empty() {
            log::debug!("terminating {} background job(s)", self.jobs.len());
            self.jobs.terminate_all();
        }
        result
    }

    fn command_loop(&mut self) -> Result<(), ShellError> {
        loop {
            self.report_finished_jobs();

            let line = match self.reader.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(e) => {
                    self.report(&e);
                    return Ok(());
                }
            };

            if input::is_ignorable(&line) {
                continue;
            }

            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.report(&e),
            }
        }
    }

    fn report_finished_jobs(&mut self) {
        for finished in self.jobs.reap() {
            println!("{}", finished);
        }
    }

    fn report(&self, error: &ShellError) {
        if !self.flags.is_set("quiet") {
            eprintln!("{}", error);
        }
    }
}
