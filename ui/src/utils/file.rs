use payloads::requests::FileUpload;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

/// Read a picked file into memory so it can go out in a multipart body.
pub async fn read_file_upload(file: &File) -> Result<FileUpload, String> {
    let bytes = read_file_as_bytes(file).await?;
    let content_type = Some(file.type_()).filter(|mime| !mime.is_empty());
    Ok(FileUpload::new(file.name(), content_type, bytes))
}

async fn read_file_as_bytes(file: &File) -> Result<Vec<u8>, String> {
    let file_reader =
        FileReader::new().map_err(|_| "Failed to create FileReader")?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reader = file_reader.clone();
        let onload = wasm_bindgen::closure::Closure::wrap(Box::new(
            move |_: web_sys::Event| {
                let outcome = match reader.result() {
                    Ok(buffer) => resolve.call1(&wasm_bindgen::JsValue::NULL, &buffer),
                    Err(e) => reject.call1(&wasm_bindgen::JsValue::NULL, &e),
                };
                if outcome.is_err() {
                    tracing::error!("Failed to settle file read");
                }
            },
        )
            as Box<dyn FnMut(_)>);

        file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    });

    file_reader
        .read_as_array_buffer(file)
        .map_err(|_| "Failed to start reading file")?;

    let result = JsFuture::from(promise)
        .await
        .map_err(|_| "Failed to read file")?;
    let array_buffer: js_sys::ArrayBuffer =
        result.dyn_into().map_err(|_| "Invalid file data")?;

    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}
