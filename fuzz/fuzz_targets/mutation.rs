#![no_main]

use arbitrary::{Arbitrary, Unstructured};

use libfuzzer_sys::fuzz_target;
use segsweep::chunkvec::ChunkVec;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { idx: usize, val: i32 },
    Remove { idx: usize },
}

impl Op {
    fn apply_to_vec(&self, vec: &mut Vec<i32>) {
        match self {
            Op::Insert { idx, val } => vec.insert(*idx % (vec.len() + 1), *val),
            Op::Remove { idx } => {
                if !vec.is_empty() {
                    vec.remove(*idx % vec.len());
                }
            }
        }
    }

    fn apply_to_chunks<const B: usize>(&self, chunks: &mut ChunkVec<i32, B>) {
        match self {
            Op::Insert { idx, val } => chunks.insert(*idx % (chunks.len() + 1), *val),
            Op::Remove { idx } => {
                if !chunks.is_empty() {
                    chunks.remove(*idx % chunks.len());
                }
            }
        }
    }
}

fn arbitrary_ops(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let len = u.arbitrary_len::<Op>()?;
    let mut vec = Vec::new();
    let mut chunks = ChunkVec::<_, 4>::new();
    for _ in 0..len {
        let op: Op = u.arbitrary()?;
        op.apply_to_vec(&mut vec);
        op.apply_to_chunks(&mut chunks);
        chunks.check_invariants();

        assert_eq!(chunks.len(), vec.len());
        assert_eq!(chunks.iter().copied().collect::<Vec<_>>(), vec);
        assert_eq!(chunks.iter().rev().next(), vec.last());
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let u = Unstructured::new(data);
    let _ = arbitrary_ops(u);
});
