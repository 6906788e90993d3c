use {
    super::SolverError,
    std::{
        fmt,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// CNF locator
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CNFIndicator {
    /// not specified
    #[default]
    Void,
    /// from a file
    File(String),
    /// embedded directly
    LitVec(usize),
}

impl fmt::Display for CNFIndicator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CNFIndicator::Void => write!(f, "No CNF specified"),
            CNFIndicator::File(file) => write!(f, "CNF file({file})"),
            CNFIndicator::LitVec(n) => write!(f, "A vec({n} clauses)"),
        }
    }
}

/// Data storage about a problem.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
    pub pathname: CNFIndicator,
}

impl fmt::Display for CNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let CNFDescription {
            num_of_variables: nv,
            num_of_clauses: nc,
            pathname: path,
        } = &self;
        write!(f, "CNF({nv}, {nc}, {path})")
    }
}

impl From<usize> for CNFDescription {
    /// a description of an empty problem on `n` vars.
    fn from(num_of_variables: usize) -> Self {
        CNFDescription {
            num_of_variables,
            ..CNFDescription::default()
        }
    }
}

impl<V: AsRef<[i32]>> From<&[V]> for CNFDescription {
    fn from(vec: &[V]) -> Self {
        let num_of_variables = vec
            .iter()
            .map(|clause| {
                clause
                    .as_ref()
                    .iter()
                    .map(|l| l.unsigned_abs())
                    .max()
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0) as usize;
        CNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
            pathname: CNFIndicator::LitVec(vec.len()),
        }
    }
}

/// A wrapper structure to make a CNFDescription from a file.
/// To make CNFDescription clone-able, a BufReader should be separated from it.
/// If you want to make a CNFDescription which isn't connected to a file,
/// just call CNFDescription::default() directly.
#[derive(Debug)]
pub struct CNFReader {
    pub cnf: CNFDescription,
    pub reader: BufReader<File>,
}

impl TryFrom<&Path> for CNFReader {
    type Error = SolverError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let pathname = if path.to_string_lossy().is_empty() {
            "--".to_string()
        } else {
            path.file_name().map_or("aStrangeNamed".to_string(), |f| {
                f.to_string_lossy().into_owned()
            })
        };
        let fs = File::open(path)?;
        let mut reader = BufReader::new(fs);
        let mut buf = String::new();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                // reached EOF without any header
                return Err(SolverError::IOError);
            }
            if let Some((nv, nc)) = parse_header(&buf) {
                let cnf = CNFDescription {
                    num_of_variables: nv,
                    num_of_clauses: nc,
                    pathname: CNFIndicator::File(pathname),
                };
                return Ok(CNFReader { cnf, reader });
            }
        }
    }
}

impl CNFReader {
    /// read the next clause in the body.
    /// Comment lines are skipped; a clause may span several lines.
    ///
    /// # Errors
    ///
    /// `SolverError::IOError` if a token isn't an integer.
    pub fn next_clause(&mut self) -> Result<Option<Vec<i32>>, SolverError> {
        let mut buf = String::new();
        let mut clause: Vec<i32> = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok((!clause.is_empty()).then_some(clause));
            }
            let line = buf.trim_start();
            if line.starts_with('c') || line.starts_with('%') {
                continue;
            }
            for token in line.split_whitespace() {
                match token.parse::<i32>() {
                    Ok(0) => return Ok(Some(clause)),
                    Ok(l) => clause.push(l),
                    Err(_) => return Err(SolverError::IOError),
                }
            }
        }
    }
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut iter = line.split_whitespace();
    if iter.next() != Some("p") || iter.next() != Some("cnf") {
        return None;
    }
    let nv = iter.next()?.parse::<usize>().ok()?;
    let nc = iter.next()?.parse::<usize>().ok()?;
    Some((nv, nc))
}
