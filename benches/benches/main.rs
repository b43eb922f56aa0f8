mod messages_benches;
mod templates_benches;

// --- CONSTANTS ---
#[allow(dead_code)]
pub const RECIPIENT_ID: &str = "1254477777772919";
#[allow(dead_code)]
pub const IMAGE_URL: &str = "https://example.com/img/collection.png";

use criterion::{criterion_group, criterion_main};

use messages_benches::{bench_project_quick_reply, bench_project_text_message};
use templates_benches::{bench_build_from_data_bag, bench_project_generic_template};

criterion_group!(
    benches,
    bench_project_text_message,
    bench_project_quick_reply,
    bench_project_generic_template,
    bench_build_from_data_bag
);
criterion_main!(benches);
