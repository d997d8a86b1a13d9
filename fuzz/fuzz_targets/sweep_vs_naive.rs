#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use segsweep::{arbitrary::lattice_segments, naive, sweep};

fn check(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let size = u.int_in_range(1..=8)?;
    let segs = lattice_segments(size, &mut u)?;

    let swept = sweep::sweep(&segs);
    let expected = naive::intersections(&segs);
    assert_eq!(swept.len(), expected.len(), "{swept:#?}\n{expected:#?}");
    for rec in &swept {
        assert!(rec.ids.len() >= 2);
        assert!(
            expected.iter().any(|other| rec.approx_eq(other, 1e-6)),
            "{rec:?} is missing from {expected:#?}"
        );
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = check(Unstructured::new(data));
});
