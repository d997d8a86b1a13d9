#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use segsweep::chunkvec::ChunkVec;

fn check(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let mut vec: Vec<i32> = u.arbitrary()?;
    vec.sort();
    let chunks = vec.iter().copied().collect::<ChunkVec<i32, 4>>();
    chunks.check_invariants();

    let search: i32 = u.arbitrary()?;
    assert_eq!(
        vec.partition_point(|x| x <= &search),
        chunks.partition_point(|x| x <= &search)
    );
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = check(Unstructured::new(data));
});
