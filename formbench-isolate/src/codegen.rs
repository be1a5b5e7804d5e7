//! Driver Generation
//!
//! Emits a self-contained Rust program that establishes the bindings, runs
//! every form for the requested number of iterations, and reports one
//! tagged record line per form. The driver carries its own allocation
//! tracker so allocator columns are populated without the caller opting in.

use crate::protocol::{
    LEFT_PREFIX, MISMATCH_EXIT_CODE, MISMATCH_PREFIX, RECORD_PREFIX, RIGHT_PREFIX,
};
use formbench_core::{Binding, Options, SourceForm};

const PRELUDE: &str = r#"#![allow(unused, non_camel_case_types)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static __ALLOC_COUNT: AtomicU64 = AtomicU64::new(0);
static __ALLOC_NANOS: AtomicU64 = AtomicU64::new(0);

struct __TrackingAlloc;

unsafe impl GlobalAlloc for __TrackingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let start = Instant::now();
        let ptr = System.alloc(layout);
        __ALLOC_NANOS.fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
        __ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let start = Instant::now();
        System.dealloc(ptr, layout);
        __ALLOC_NANOS.fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
    }
}

#[global_allocator]
static __GLOBAL: __TrackingAlloc = __TrackingAlloc;

fn __reset_alloc() {
    __ALLOC_COUNT.store(0, Ordering::Relaxed);
    __ALLOC_NANOS.store(0, Ordering::Relaxed);
}

fn __alloc_stats() -> (u64, u64) {
    (
        __ALLOC_COUNT.load(Ordering::Relaxed),
        __ALLOC_NANOS.load(Ordering::Relaxed),
    )
}

fn __emit_record(index: usize, elapsed_ns: u64, allocs: u64, alloc_ns: u64) {
    println!(
        "__PREFIX__{{\"index\":{},\"elapsed_ns\":{},\"allocs\":{},\"alloc_elapsed_ns\":{}}}",
        index, elapsed_ns, allocs, alloc_ns
    );
}
"#;

/// Render the full driver source for the given forms, bindings and options.
///
/// Form expressions and binding expressions are spliced in verbatim;
/// binding names must already have passed
/// [`formbench_core::validate_bindings`].
pub fn generate_driver(forms: &[SourceForm], bindings: &[Binding], options: &Options) -> String {
    let mut out = PRELUDE.replace("__PREFIX__", RECORD_PREFIX);

    out.push_str("\nfn main() {\n");
    out.push_str(&format!(
        "    const __ITERATIONS: u64 = {};\n",
        options.iterations
    ));
    for binding in bindings {
        out.push_str(&format!("    let {} = {};\n", binding.name, binding.expr));
    }

    for (i, form) in forms.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("    let mut __keep_{i} = None;\n"));
        out.push_str("    {\n");
        out.push_str("        __reset_alloc();\n");
        out.push_str("        let __start = Instant::now();\n");
        out.push_str("        for __iter in 0..__ITERATIONS {\n");
        out.push_str(&format!(
            "            let __value = std::hint::black_box(({}));\n",
            form.expr
        ));
        out.push_str("            if __iter == 0 {\n");
        out.push_str(&format!("                __keep_{i} = Some(__value);\n"));
        out.push_str("            }\n");
        out.push_str("        }\n");
        out.push_str("        let __elapsed = __start.elapsed();\n");
        out.push_str("        let (__allocs, __alloc_ns) = __alloc_stats();\n");
        out.push_str(&format!(
            "        __emit_record({i}, __elapsed.as_nanos() as u64, __allocs, __alloc_ns);\n"
        ));
        out.push_str("    }\n");

        if options.check_equivalence && i > 0 {
            let prev = i - 1;
            out.push_str(&format!(
                "    if let (Some(__left), Some(__right)) = (__keep_{prev}.as_ref(), __keep_{i}.as_ref()) {{\n"
            ));
            out.push_str("        if __left != __right {\n");
            out.push_str(&format!(
                "            println!(\"{MISMATCH_PREFIX}{{}} {{}}\", {prev}, {i});\n"
            ));
            out.push_str(&format!(
                "            println!(\"{LEFT_PREFIX}{{:?}}\", __left);\n"
            ));
            out.push_str(&format!(
                "            println!(\"{RIGHT_PREFIX}{{:?}}\", __right);\n"
            ));
            out.push_str(&format!(
                "            ::std::process::exit({MISMATCH_EXIT_CODE});\n"
            ));
            out.push_str("        }\n");
            out.push_str("    }\n");
        }
    }

    out.push_str("}\n");
    out
}
