use std::fmt;

/// A generator of the Luby series 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...
#[derive(Clone, Debug, Default)]
pub struct LubySeries {
    index: usize,
}

impl fmt::Display for LubySeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Luby[index:{}]", self.index)
    }
}

impl LubySeries {
    /// Find the finite subsequence that contains the current index, and the
    /// size of that subsequence, then descend into it until the index hits
    /// the last element of a complete subsequence.
    pub fn next_unchecked(&mut self) -> usize {
        let mut x = self.index;
        self.index += 1;
        let mut size: usize = 1;
        let mut seq: u32 = 0;
        while size < x + 1 {
            seq += 1;
            size = 2 * size + 1;
        }
        while size - 1 != x {
            size = (size - 1) >> 1;
            seq -= 1;
            x %= size;
        }
        1usize << seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luby_series() {
        let mut luby = LubySeries::default();
        let v = vec![1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1];
        let l = v
            .iter()
            .map(|_| luby.next_unchecked())
            .collect::<Vec<usize>>();
        assert_eq!(l, v);
        assert_eq!(luby.to_string(), "Luby[index:16]");
    }
}
