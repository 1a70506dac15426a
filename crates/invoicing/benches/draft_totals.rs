use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use invoicehub_invoicing::{InvoiceDraft, LineField};

fn draft_with_lines(count: usize) -> InvoiceDraft {
    let mut draft = InvoiceDraft::new();
    draft.set_client_name("Bench Client");
    draft.remove_line(0);
    for i in 0..count {
        draft.add_line();
        draft.update_line(i, LineField::Name, format!("item-{i}"));
        draft.update_line(i, LineField::Quantity, format!("{}", i % 7 + 1));
        draft.update_line(i, LineField::UnitPrice, format!("{}.25", i % 100));
        // Every tenth line stays invalid (zero price) to exercise the filter.
        if i % 10 == 0 {
            draft.update_line(i, LineField::UnitPrice, "0");
        }
    }
    draft
}

fn bench_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("draft_totals");

    for &size in &[10usize, 100, 1_000] {
        let draft = draft_with_lines(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("totals", size), &draft, |b, draft| {
            b.iter(|| black_box(draft.totals()))
        });

        group.bench_with_input(BenchmarkId::new("create_payload", size), &draft, |b, draft| {
            b.iter(|| black_box(draft.to_create_payload()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_totals);
criterion_main!(benches);
