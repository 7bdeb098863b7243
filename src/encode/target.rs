//! Targets for encoding.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{cmp, error};
use std::convert::Infallible;
use crate::length::Length;


//------------ Target --------------------------------------------------------

/// A target for encoding.
///
/// This type provides a simplified version of `io::Write` that allows an
/// implementing type to define its own error type. The main purpose is to
/// be able to set the error to `Infallible`. This allows users to erase
/// the error case and avoid unnecessary `unwrap`s.
pub trait Target {
    /// The error type of the target.
    type Error: error::Error;

    /// Writes the data to the target.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Target> Target for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (*self).write_all(data)
    }
}

impl Target for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}


//------------ ChunkTarget ---------------------------------------------------

/// A target wrapper that writes data split into length-prefixed chunks.
///
/// The type takes some other target and writes data broken up into chunks
/// of a given size, except for the last chunk which can be shorter. Each
/// chunk is preceded by its own length determinant.
///
/// In order to know the size of the last chunk, the type needs to know the
/// overall length of the data. Because the type can’t produce its own
/// errors due to the structure of the [`Target`] trait, it will have to
/// quietly ignore any data written past this length. It will, however, panic
/// in debug mode.
pub struct ChunkTarget<'a, T> {
    /// The overall length of the data to be written.
    len: usize,

    /// The maximum length of the content of a chunk.
    step: usize,

    /// The target to write the data to.
    target: &'a mut T,

    /// The amount of content we have already written.
    written: usize,
}

impl<'a, T> ChunkTarget<'a, T> {
    /// Creates a new chunk target.
    ///
    /// The returned target will wrap the provided `target`. It will never
    /// write more than `len` bytes of data. Each chunk will contain `step`
    /// bytes except for the last one.
    ///
    /// # Panics
    ///
    /// The function panics if `step` is zero.
    pub fn new(len: usize, step: usize, target: &'a mut T) -> Self {
        assert!(step > 0, "chunk size must not be zero");
        Self { len, step, target, written: 0 }
    }
}

impl ChunkTarget<'static, ()> {
    /// Returns the overall length of data written through a chunk target.
    ///
    /// The function returns the length of the sequence of chunks resulting
    /// from splitting data of `len` bytes into chunks of `step` bytes each,
    /// including the length determinants.
    pub fn encoded_len(len: usize, step: usize) -> usize {
        // The length of the full-size chunks.
        let full_len = (len / step) * (
            Length::definite(step).encoded_len() + step
        );

        // The length of the final chunk. We only need to consider it if it
        // isn’t zero.
        let tail_len = len % step;

        if tail_len != 0 {
            full_len + Length::definite(tail_len).encoded_len() + tail_len
        }
        else {
            full_len
        }
    }
}

impl<T: Target> Target for ChunkTarget<'_, T> {
    type Error = T::Error;

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), T::Error> {
        if self.written + data.len() > self.len {
            debug_assert!(false, "attempted to write past end of ChunkTarget");
            return Ok(())
        }
        while !data.is_empty() {
            if self.written % self.step == 0 {
                Length::definite(
                    cmp::min(self.step, self.len - self.written)
                ).write_encoded(self.target)?;
            }
            let step = self.step - self.written % self.step;
            if step < data.len() {
                let (head, tail) = data.split_at(step);
                self.target.write_all(head)?;
                self.written += head.len();
                data = tail;
            }
            else {
                self.target.write_all(data)?;
                self.written += data.len();
                data = b"";
            }
        }
        Ok(())
    }
}


//------------ infallible ----------------------------------------------------

/// Erases an error if it can’t happen.
pub fn infallible<T, E: Into<Infallible>>(res: Result<T, E>) -> T {
    match res {
        Ok(some) => some,
        Err(_) => unreachable!(),
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn chunked(data: &[u8], step: usize) -> Vec<u8> {
        let mut res = Vec::new();
        let mut target = ChunkTarget::new(data.len(), step, &mut res);
        infallible(target.write_all(data));
        assert_eq!(res.len(), ChunkTarget::encoded_len(data.len(), step));
        res
    }

    #[test]
    fn chunks() {
        assert_eq!(chunked(b"", 2), b"");
        assert_eq!(chunked(b"ab", 2), b"\x02ab");
        assert_eq!(chunked(b"abcde", 2), b"\x02ab\x02cd\x01e");
        assert_eq!(chunked(b"abcd", 2), b"\x02ab\x02cd");
        assert_eq!(chunked(b"abc", 5), b"\x03abc");
    }

    #[test]
    fn chunks_across_writes() {
        let mut res = Vec::new();
        let mut target = ChunkTarget::new(5, 2, &mut res);
        infallible(target.write_all(b"a"));
        infallible(target.write_all(b"bcd"));
        infallible(target.write_all(b"e"));
        assert_eq!(res, b"\x02ab\x02cd\x01e");
    }

    #[test]
    fn long_chunks() {
        let data = vec![7u8; 300];
        let res = chunked(&data, 200);
        assert_eq!(&res[..2], b"\x81\xc8");
        assert_eq!(&res[202..204], b"\x64\x07");
        assert_eq!(res.len(), 2 + 200 + 1 + 100);
    }
}
