#![no_main]

use libfuzzer_sys::fuzz_target;
use unitgen::{CompilationUnitBuilder, FeatureSet, QualifiedName};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(target) = "com.example.Widget".parse::<QualifiedName>() else {
        return;
    };
    let Ok(mut code) = CompilationUnitBuilder::new(target, [], FeatureSet::default()) else {
        return;
    };
    // Any text either streams or fails with a structural error; the preamble always survives.
    let _ = code.append_str(s);
    assert!(code.as_str().starts_with("// Autogenerated code. Do not modify.\npackage com.example;\n\n"));
});
