//! A fixed-size bitboard implementation using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. Boards are
//! represented as an `R×C` grid packed into an unsigned integer `T`, which
//! must hold at least `R * C` bits.

use num_traits::{PrimInt, Unsigned, Zero};

/// A fixed-size R×C bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const R: usize, const C: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const R: usize, const C: usize> BitBoard<T, R, C>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Board with bit (r, c) set wherever `f(r, c)` holds.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = T::zero();
        for r in 0..R {
            for c in 0..C {
                if f(r, c) {
                    bits = bits | (T::one() << (r * C + c));
                }
            }
        }
        BitBoard { bits }
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterator over the set bits of the board, in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T, R, C> {
        SetBits {
            board: self,
            idx: 0,
        }
    }

    /// Position of the `n`th set bit in row-major order.
    pub fn nth_set_bit(&self, n: usize) -> Option<(usize, usize)> {
        self.iter_set_bits().nth(n)
    }
}

/// Iterator over the set bits of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T, const R: usize, const C: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, R, C>,
    idx: usize,
}

impl<'a, T, const R: usize, const C: usize> Iterator for SetBits<'a, T, R, C>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < R * C {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some((idx / C, idx % C));
            }
        }
        None
    }
}
