/// Assert that a fallible core call failed with a given status code
#[macro_export]
macro_rules! assert_status {
    ($result:expr, $code:expr) => {
        match $result {
            Ok(_) => panic!("Expected status {}, got Ok", $code),
            Err(error) => assert_eq!(
                error.code(),
                $code,
                "Expected status {} but error was: {}",
                $code,
                error
            ),
        }
    };
}

/// Assert that two byte buffers are identical, reporting the first differing offset
#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {
        let left: &[u8] = &$left;
        let right: &[u8] = &$right;
        assert_eq!(left.len(), right.len(), "Buffer lengths differ");
        if let Some(offset) = left.iter().zip(right.iter()).position(|(a, b)| a != b) {
            panic!(
                "Buffers differ at offset {}: {:#04x} != {:#04x}",
                offset, left[offset], right[offset]
            );
        }
    };
}
