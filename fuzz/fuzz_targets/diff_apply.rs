#![no_main]

use libfuzzer_sys::fuzz_target;
use vdom::json::from_json_str;
use vdom::{ArenaTree, Element, LiveTree, diff};

// Input: two JSON descriptions separated by a NUL byte.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((old, new)) = text.split_once('\0') else {
        return;
    };
    let (Ok(old), Ok(new)) = (from_json_str(old), from_json_str(new)) else {
        return;
    };

    let mut tree = ArenaTree::new();
    let Ok(wrapper) = tree.mount(&Element::new("fuzz-root").into()) else {
        return;
    };
    let Ok(node) = tree.render(&old) else {
        return;
    };
    if tree.append_child(&wrapper, &node).is_err() {
        return;
    }

    let patch = diff(Some(&old), &new);
    let result = patch
        .apply(&mut tree, node)
        .expect("patch computed from the rendered tree must apply");
    // Emptied child lists detach their parent, so only exact patches are compared.
    if patch.stats().detached_parents == 0 {
        let node = result.expect("only absent descriptions remove");
        let live = tree.to_description(node).expect("materialize");
        assert_eq!(live, new, "live tree diverged from new description");
    }
});
