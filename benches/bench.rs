use criterion::{black_box, criterion_group, criterion_main, Criterion};
use repool::{Lifecycle, Pool};

struct BufferLifecycle;

const BUFFER_CAPACITY: usize = 64 * 1024;

impl Lifecycle<Vec<u8>> for BufferLifecycle {
    #[inline(always)]
    fn create(&mut self) -> Vec<u8> {
        Vec::with_capacity(BUFFER_CAPACITY)
    }

    #[inline(always)]
    fn on_release(&mut self, buf: &mut Vec<u8>) {
        buf.clear()
    }

    #[inline(always)]
    fn validate(&mut self, buf: &Vec<u8>) -> bool {
        buf.capacity() >= BUFFER_CAPACITY
    }
}

fn acquire_release(c: &mut Criterion) {
    c.bench_function("repool", |b| {
        let mut pool = Pool::new(1024, BufferLifecycle).unwrap();
        b.iter(|| {
            let buf = pool.acquire().unwrap();
            let cap = black_box(buf.capacity());
            pool.release(buf).unwrap();
            cap
        })
    });
    c.bench_function("system", |b| {
        let mut alloc = BufferLifecycle;
        b.iter(|| {
            let buf = black_box(alloc.create());
            black_box(buf.capacity())
        })
    });
}

criterion_group!(benches, acquire_release);
criterion_main!(benches);
