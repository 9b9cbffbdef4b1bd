use std::{fs::File, io::BufWriter, io::Write};

use rasterpipe_core::prelude::*;

fn main() -> std::io::Result<()> {
    #[rustfmt::skip]
    let pos = [
        -1.0, -1.0, 0.0,
         1.0, -1.0, 0.0,
         0.0,  1.0, 0.0,
    ];
    #[rustfmt::skip]
    let col = [
        1.0, 0.0, 0.0,
        0.0, 0.8, 0.0,
        0.4, 0.4, 1.0,
    ];

    let (w, h) = (640, 480);
    let mvp = translate(0.0, 0.0, 2.0)
        .then(&perspective(1.0, w as f32 / h as f32, 0.1..1000.0));

    let vs = Shader::new(
        |i: usize, a: &Attribs, uni: &[ShaderValue]| {
            let mvp = Mat4::try_from(&uni[0]).unwrap_or(Mat4::identity());
            let pos = mvp.apply(&a[0].vec4(i));
            let col = a[1].vec3(i).to_vec4(1.0);
            vec![ShaderValue::from(pos), ShaderValue::from(col)]
        },
        vec![mvp.into()],
    );
    let fs = Shader::new(
        |frag: Frag, _: &[ShaderValue]| Vec4::try_from(&frag.var[0]).ok(),
        vec![],
    );

    let mut r = Renderer::new();
    r.set_framebuffer(w, h, 4);
    r.set_viewport(0, 0, w as u32, h as u32);
    r.set_vertex_shader(&vs);
    r.set_fragment_shader(&fs);
    r.set_attribute(0, AttribStream::new(&pos, 3));
    r.set_attribute(1, AttribStream::new(&col, 3));
    r.clear();
    r.draw(0, 3);

    println!("{}", r.stats());

    // Binary PPM, top row first
    let buf = r.color_buf();
    let mut out = BufWriter::new(File::create("triangle.ppm")?);
    writeln!(out, "P6 {w} {h} 255")?;
    for y in (0..h).rev() {
        for px in buf.row(y).chunks_exact(4) {
            out.write_all(&px[..3])?;
        }
    }
    out.flush()
}
