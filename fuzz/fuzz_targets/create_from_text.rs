#![no_main]

use block_tree::ContentState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let Ok(state) = ContentState::create_from_text(&input) else {
        panic!("text import must always produce a document");
    };

    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    assert_eq!(state.plain_text(None), normalized);
    assert_eq!(state.block_map().len(), normalized.split('\n').count());
    for block in state.block_map() {
        assert_eq!(block.character_list().len(), block.length());
    }
});
