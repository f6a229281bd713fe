use planeview_assets::TextureData;

/// Upload RGBA8 pixels, padding bytes_per_row to the copy alignment wgpu
/// requires.
pub fn upload_rgba8(queue: &wgpu::Queue, tex: &wgpu::Texture, w: u32, h: u32, data: &[u8]) {
    let row_bytes = 4 * w;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded = row_bytes.div_ceil(align) * align;

    let copy_dst = wgpu::TexelCopyTextureInfo {
        texture: tex,
        mip_level: 0,
        origin: wgpu::Origin3d::ZERO,
        aspect: wgpu::TextureAspect::All,
    };
    let extent = wgpu::Extent3d {
        width: w,
        height: h,
        depth_or_array_layers: 1,
    };

    if padded == row_bytes {
        queue.write_texture(
            copy_dst,
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(row_bytes),
                rows_per_image: Some(h),
            },
            extent,
        );
        return;
    }

    let mut staged = vec![0u8; (padded * h) as usize];
    for y in 0..h {
        let src = &data[(y * row_bytes) as usize..(y * row_bytes + row_bytes) as usize];
        let dst = &mut staged[(y * padded) as usize..(y * padded + row_bytes) as usize];
        dst.copy_from_slice(src);
    }
    queue.write_texture(
        copy_dst,
        &staged,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(padded),
            rows_per_image: Some(h),
        },
        extent,
    );
}

/// Create a texture + view + sampler from decoded pixel data and upload it.
pub fn create_plane_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &TextureData,
) -> (wgpu::TextureView, wgpu::Sampler) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("plane_texture"),
        size: wgpu::Extent3d {
            width: data.width(),
            height: data.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    upload_rgba8(queue, &tex, data.width(), data.height(), data.pixels());

    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("plane_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });
    (view, sampler)
}
