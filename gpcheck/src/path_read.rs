use std::io::{self, Read};
use std::path::PathBuf;

/// A reader together with the name of the file it reads from.
pub struct PathRead {
    pub path: String,
    pub read: Box<dyn Read>,
}

impl TryFrom<&PathBuf> for PathRead {
    type Error = io::Error;

    /// Open a file for reading, where "-" stands for standard input.
    fn try_from(file: &PathBuf) -> Result<Self, Self::Error> {
        if file.as_os_str() == "-" {
            let read = Box::new(io::stdin());
            let path = String::from("<stdin>");
            Ok(Self { path, read })
        } else {
            let read = Box::new(std::fs::File::open(file)?);
            let path = file.display().to_string();
            Ok(Self { path, read })
        }
    }
}
