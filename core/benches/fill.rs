//! Fillrate benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use rasterpipe_core::prelude::*;

const SIZE: usize = 512;

/// Two triangles covering the whole viewport.
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

fn renderer<'a>(
    vs: &'a Shader<dyn VertexShader + 'a>,
    fs: &'a Shader<dyn FragmentShader + 'a>,
) -> Renderer<'a> {
    let mut r = Renderer::new();
    r.set_framebuffer(SIZE, SIZE, 4);
    r.set_viewport(0, 0, SIZE as u32, SIZE as u32);
    r.set_vertex_shader(vs);
    r.set_fragment_shader(fs);
    r
}

fn position_and_color() -> Shader<impl Fn(usize, &Attribs, &[ShaderValue]) -> Varyings> {
    Shader::new(
        |i: usize, a: &Attribs, _: &[ShaderValue]| {
            let pos = a[0].vec4(i);
            let col = vec3(0.5 * pos.x() + 0.5, 0.5 * pos.y() + 0.5, 0.5);
            vec![ShaderValue::from(pos), ShaderValue::from(col)]
        },
        vec![],
    )
}

fn full_screen(c: &mut Criterion) {
    let vs = position_and_color();
    let flat = Shader::new(
        |_: Frag, uni: &[ShaderValue]| Vec4::try_from(&uni[0]).ok(),
        vec![vec4(0.8, 0.8, 0.8, 1.0).into()],
    );
    let gouraud = Shader::new(
        |f: Frag, _: &[ShaderValue]| {
            let c = Vec3::try_from(&f.var[0]).ok()?;
            Some(c.to_vec4(1.0))
        },
        vec![],
    );

    let mut group = c.benchmark_group("full_screen");
    group.throughput(Throughput::Elements((SIZE * SIZE) as u64));

    let shaders: [(&str, &Shader<dyn FragmentShader>); 2] =
        [("flat", &flat), ("gouraud", &gouraud)];
    for (name, fs) in shaders {
        let mut r = renderer(&vs, fs);
        r.set_topology(Topology::TriangleStrip);
        r.set_attribute(0, AttribStream::new(&QUAD, 2));
        group.bench_function(name, |b| {
            b.iter(|| {
                r.clear();
                r.draw(0, 4);
            })
        });
    }
    group.finish();
}

fn small_triangles(c: &mut Criterion) {
    let vs = position_and_color();
    let fs = Shader::new(
        |f: Frag, _: &[ShaderValue]| {
            Vec3::try_from(&f.var[0]).ok().map(|c| c.to_vec4(1.0))
        },
        vec![],
    );

    let mut group = c.benchmark_group("small_triangles");
    for px in [2usize, 8, 32] {
        // A grid of right triangles with legs `px` pixels long
        let n = SIZE / px;
        let step = 2.0 / n as f32;
        let mut pos = Vec::with_capacity(n * n * 6);
        for j in 0..n {
            for i in 0..n {
                let (x, y) = (i as f32 * step - 1.0, j as f32 * step - 1.0);
                pos.extend([x, y, x + step, y, x, y + step]);
            }
        }
        let mut r = renderer(&vs, &fs);
        r.set_attribute(0, AttribStream::new(&pos, 2));

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(px), &n, |b, &n| {
            b.iter(|| {
                r.clear();
                r.draw(0, 3 * n * n);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, full_screen, small_triangles);
criterion_main!(benches);
