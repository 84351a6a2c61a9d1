// The strategy used to advance between slots in a probe sequence.
//
// Both strategies start at `h1(hash)`. They differ only in the stride between
// successive slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeMode {
    /// Advance by one slot at a time, wrapping at the end of the table.
    ///
    /// The secondary hash is still computed for every walk, but it does not
    /// influence which slots are visited.
    #[default]
    Linear,
    /// Advance by the secondary hash `h2(key)`.
    ///
    /// The stride is adjusted to be coprime with the capacity, so the walk
    /// visits every slot exactly once.
    DoubleHash,
}

// Primary hash: the starting slot for a key.
#[inline]
pub fn h1(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

// Secondary hash: the stride derived from the largest prime not exceeding
// the capacity.
//
// `prime` must be `largest_prime(capacity)`. A capacity of 1 has no prime
// below it, so the stride is 0.
#[inline]
pub fn h2(hash: u64, capacity: usize, prime: Option<usize>) -> usize {
    match prime {
        Some(prime) => prime - h1(hash, capacity) % prime,
        None => 0,
    }
}

// Returns whether `n` is prime, by trial division up to its square root.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    if n < 4 {
        return true;
    }

    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }

        i += 1;
    }

    true
}

// Returns the largest prime less than or equal to `n`, searching downward.
pub fn largest_prime(n: usize) -> Option<usize> {
    (2..=n).rev().find(|&i| is_prime(i))
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

// Returns the smallest stride `>= step` that is coprime with `capacity`.
//
// Any such stride generates every residue modulo `capacity`.
fn coprime_stride(step: usize, capacity: usize) -> usize {
    let mut stride = step.max(1);
    while gcd(stride, capacity) != 1 {
        stride += 1;
    }

    stride % capacity
}

// A probe sequence over a table of `capacity` slots.
//
// The sequence yields at most `capacity` indices.
#[derive(Debug)]
pub struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of slots visited so far.
    pub len: usize,
    // The number of occupied slots passed over without a match.
    pub collisions: usize,
    // The distance between successive indices.
    stride: usize,
    capacity: usize,
}

impl Probe {
    // Initialize the probe sequence for the given hash.
    //
    // `prime` must be `largest_prime(capacity)`.
    #[inline]
    pub fn start(hash: u64, capacity: usize, prime: Option<usize>, mode: ProbeMode) -> Probe {
        let stride = match mode {
            ProbeMode::Linear => 1 % capacity,
            ProbeMode::DoubleHash => coprime_stride(h2(hash, capacity, prime), capacity),
        };

        Probe {
            i: h1(hash, capacity),
            len: 0,
            collisions: 0,
            stride,
            capacity,
        }
    }

    // Returns `true` if every slot in the sequence has been visited.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.len >= self.capacity
    }

    // Increment the probe sequence.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;
        self.i = (self.i + self.stride) % self.capacity;
    }
}
