//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享层的 `HttpClient`。

use mealmatch_shared::error::{ClientError, ClientResult};
use mealmatch_shared::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// 将 JS 异常转为可读文本
fn js_error(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn build(req: &HttpRequest) -> ClientResult<Request> {
        let headers = Headers::new()
            .map_err(|e| ClientError::Network(format!("创建 Headers 失败: {}", js_error(&e))))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::Network(format!("设置 Header 失败: {}", js_error(&e))))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        if req.include_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ClientError::Network(js_error(&e)))
    }

    async fn read_text(response: &Response) -> ClientResult<String> {
        let promise = response
            .text()
            .map_err(|e| ClientError::Decode(js_error(&e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::Decode(js_error(&e)))?;

        text.as_string()
            .ok_or_else(|| ClientError::Decode("响应体无法转换为字符串".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::Network("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Network(js_error(&e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ClientError::Decode(format!("Response 类型转换失败: {}", js_error(&e))))?;

        let status = response.status();
        let body = Self::read_text(&response).await?;

        Ok(HttpResponse { status, body })
    }
}
