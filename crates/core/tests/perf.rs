//! Build-time snapshot on a generated page (local benchmarking).
//!
//! Run with:
//!   cargo test -p domscope-core --test perf -- --ignored --nocapture

use domscope_core::parse;
use std::time::Instant;

fn generated_page(cards: usize) -> String {
    let mut html = String::from(
        r#"<html><head><title>Perf</title></head><body><header class="flex justify-between"><nav></nav></header><main class="container mx-auto"><div class="grid grid-cols-3 gap-6">"#,
    );
    for i in 0..cards {
        html.push_str(&format!(
            r#"<div class="card p-4 rounded-lg shadow-md"><img src="{i}.png"><h3 class="text-xl font-bold">Card {i}</h3><p class="text-sm">Body {i}</p><a class="px-4 py-2 bg-blue-600" href="/{i}">Open</a></div>"#,
        ));
    }
    html.push_str("</div></main><footer></footer></body></html>");
    html
}

#[test]
#[ignore]
fn perf_generated_page() {
    for cards in [10, 100, 1000] {
        let html = generated_page(cards);

        let start = Instant::now();
        let page = parse(&html);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        println!(
            "{:>5} cards | {:>6} bytes | {:>6} elements | {:>8.2} ms",
            cards,
            html.len(),
            page.total_elements,
            elapsed_ms
        );
        assert_eq!(page.element_counts.get("h3"), Some(&cards));
    }
}
