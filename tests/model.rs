#![cfg(feature = "alloc")]

use rand::{rngs::StdRng, Rng, SeedableRng};

use flex_buffer::{Buffer, Grow, GrowByHalf, GrowDoubling, GrowExact, RawAlloc};

fn run_model<T, A, G>(mut buf: Buffer<T, A, G>, seed: u64, make: impl Fn(u32) -> T)
where
    T: Clone + PartialEq + core::fmt::Debug,
    A: RawAlloc,
    G: Grow,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model: Vec<T> = Vec::new();

    for _ in 0..2000 {
        match rng.gen_range(0..5) {
            0 => {
                let pos = rng.gen_range(0..=model.len());
                let count = rng.gen_range(0..6);
                let values: Vec<T> = (0..count).map(|_| make(rng.gen())).collect();
                let cap = buf.capacity();
                buf.insert(pos, &values);
                model.splice(pos..pos, values.iter().cloned());
                if model.len() > cap {
                    // growth follows the policy for the required length
                    assert_eq!(buf.capacity(), G::next_capacity::<T>(cap, model.len()));
                    assert!(buf.capacity() >= model.len());
                } else {
                    assert_eq!(buf.capacity(), cap);
                }
            }
            1 => {
                let end = rng.gen_range(0..=model.len());
                let start = rng.gen_range(0..=end);
                let cap = buf.capacity();
                assert_eq!(buf.erase(start..end), start);
                model.drain(start..end);
                assert_eq!(buf.capacity(), cap);
            }
            2 => {
                let new_len = rng.gen_range(0..64);
                let value = make(rng.gen());
                buf.resize(new_len, value.clone());
                model.resize(new_len, value);
                assert!(buf.capacity() >= new_len);
            }
            3 => {
                let cap = rng.gen_range(0..128);
                let before = buf.capacity();
                buf.reserve(cap);
                assert_eq!(buf.capacity(), before.max(cap));
            }
            _ => {
                if rng.gen_ratio(1, 10) {
                    let cap = buf.capacity();
                    buf.clear();
                    model.clear();
                    assert_eq!(buf.capacity(), cap);
                }
            }
        }
        assert_eq!(buf.as_slice(), model.as_slice());
        assert!(buf.len() <= buf.capacity());
    }
}

#[test]
fn model_plain() {
    for seed in 0..8 {
        run_model(Buffer::<u32>::new(), seed, |v| v);
    }
}

#[test]
fn model_growth_by_half() {
    // every reallocating insert yields at least one and a half times the
    // required length
    let mut rng = StdRng::seed_from_u64(7);
    let mut buf = Buffer::<u32, _, GrowByHalf>::new_in(flex_buffer::Global);
    let mut model = Vec::new();
    for _ in 0..500 {
        let pos = rng.gen_range(0..=model.len());
        let values: Vec<u32> = (0..rng.gen_range(1..9)).map(|_| rng.gen()).collect();
        let cap = buf.capacity();
        buf.insert(pos, &values);
        model.splice(pos..pos, values);
        if model.len() > cap {
            assert!(buf.capacity() >= model.len() * 3 / 2);
        }
        if rng.gen_ratio(1, 8) {
            let end = rng.gen_range(0..=model.len());
            buf.erase(..end);
            model.drain(..end);
        }
        assert_eq!(buf.as_slice(), model.as_slice());
    }
}

#[test]
fn model_complex() {
    for seed in 0..8 {
        run_model(Buffer::<String>::new(), seed, |v| v.to_string());
    }
}

#[test]
fn model_growth_policies() {
    fn check<G: Grow>(seed: u64) {
        run_model(Buffer::<u16, _, G>::new_in(flex_buffer::Global), seed, |v| {
            v as u16
        });
        run_model(
            Buffer::<Box<u16>, _, G>::new_in(flex_buffer::Global),
            seed,
            |v| Box::new(v as u16),
        );
    }
    check::<GrowByHalf>(100);
    check::<GrowDoubling>(101);
    check::<GrowExact>(102);
}
