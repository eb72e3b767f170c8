use super::hand::Hand;

/// Iterates every n-card Hand that avoids a blocked mask, in a fixed order.
///
/// Successive bit patterns with the same popcount come from Gosper's hack;
/// patterns touching the mask are skipped.
pub struct HandIterator {
    next: u64,
    mask: u64,
}

impl HandIterator {
    pub fn combinations(&self) -> usize {
        let n = 52 - Hand::from(self.mask).size();
        let k = Hand::from(self.next).size();
        (0..k).fold(1, |x, i| x * (n - i) / (i + 1))
    }

    fn exhausted(&self) -> bool {
        self.next == 0 || self.next >= 1 << 52
    }

    fn permute(&self) -> u64 {
        let x = self.next;
        let low = x | (x - 1);
        let carry = low + 1;
        let fill = ((!low & carry) - 1) >> (x.trailing_zeros() + 1);
        carry | fill
    }

    fn advance(&mut self) {
        loop {
            self.next = self.permute();
            if self.next & self.mask == 0 || self.exhausted() {
                break;
            }
        }
    }
}

impl Iterator for HandIterator {
    type Item = Hand;
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted() {
            None
        } else {
            let hand = Hand::from(self.next);
            self.advance();
            Some(hand)
        }
    }
}

/// size and mask are immutable and decided at construction
impl From<(usize, Hand)> for HandIterator {
    fn from((n, mask): (usize, Hand)) -> Self {
        let mut this = Self {
            next: (1 << n) - 1,
            mask: u64::from(mask),
        };
        while this.next & this.mask > 0 && !this.exhausted() {
            this.next = this.permute();
        }
        this
    }
}
