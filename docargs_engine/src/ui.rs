use crate::error::Error;

/// Where a [`GeneralParser`](crate::GeneralParser) sends its output, when it is asked to handle the outcome itself.
pub trait UserInterface {
    /// Print regular output (the help message, or the version).
    fn print(&self, message: String);

    /// Print a parse failure.
    fn print_error(&self, error: Error);
}

/// Prints to the standard output and standard error streams.
pub struct ConsoleInterface {}

impl Default for ConsoleInterface {
    fn default() -> Self {
        Self {}
    }
}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: Error) {
        eprintln!("{error}");
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub use self::util::InMemoryInterface;

#[cfg(any(test, feature = "unit_test"))]
mod util {
    use std::cell::RefCell;

    use crate::error::Error;
    use crate::ui::UserInterface;

    /// Records the output, for inspection in tests.
    pub struct InMemoryInterface {
        message: RefCell<Option<Vec<String>>>,
        error: RefCell<Option<Error>>,
    }

    impl Default for InMemoryInterface {
        fn default() -> Self {
            Self {
                message: RefCell::new(None),
                error: RefCell::new(None),
            }
        }
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.message
                .borrow_mut()
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: Error) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error);
        }
    }

    impl InMemoryInterface {
        /// Take the recorded (newline joined) message and error.
        pub fn consume(self) -> (Option<String>, Option<Error>) {
            let InMemoryInterface { message, error } = self;

            (
                message.take().map(|messages| messages.join("\n")),
                error.take(),
            )
        }
    }
}
