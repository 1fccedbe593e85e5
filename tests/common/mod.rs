#![allow(dead_code)]

//Deterministic xorshift, good enough to produce compressible but varied data
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, limit: u64) -> u64 {
        self.next() % limit
    }
}

const WORDS: [&str; 12] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliett", "kilo", "lima",
];

pub fn text(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = Rng::new(seed);
    let mut result = Vec::with_capacity(len + 16);
    while result.len() < len {
        result.extend_from_slice(WORDS[rng.below(WORDS.len() as u64) as usize].as_bytes());
        result.push(b' ');
    }
    result.truncate(len);
    result
}

pub fn json_samples(count: usize) -> Vec<Vec<u8>> {
    let mut rng = Rng::new(0x5eed);
    (0..count).map(|idx| {
        let name = WORDS[rng.below(WORDS.len() as u64) as usize];
        let tag = WORDS[rng.below(WORDS.len() as u64) as usize];
        format!(
            "{{\"id\":{idx},\"name\":\"{name}\",\"score\":{},\"active\":{},\"tags\":[\"{tag}\",\"{name}-{}\"],\"created_at\":\"2021-0{}-1{}T12:{:02}:00Z\"}}",
            rng.below(100_000),
            rng.below(2) == 0,
            rng.below(1000),
            1 + rng.below(9),
            rng.below(10),
            rng.below(60),
        ).into_bytes()
    }).collect()
}
