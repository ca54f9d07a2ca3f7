// src/app/posters.rs — in-memory artwork store: worker pool downloads +
// decodes, UI thread uploads a bounded number of textures per frame.
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui::{self as eg, ColorImage, TextureHandle};
use tracing::warn;

use crate::tmdb::{image_url, ImageSize, MovieDetails, MovieSummary};

const WORKER_COUNT: usize = 8;
const MAX_UPLOADS_PER_FRAME: usize = 4;

enum PosterMsg {
    Decoded {
        url: String,
        width: usize,
        height: usize,
        rgba: Vec<u8>,
    },
    Failed {
        url: String,
        error: String,
    },
}

pub struct PosterStore {
    textures: HashMap<String, TextureHandle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    work_tx: Option<Sender<String>>,
    done_rx: Option<Receiver<PosterMsg>>,
}

impl Default for PosterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PosterStore {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            work_tx: None,
            done_rx: None,
        }
    }

    /// Queue a download unless the URL is already uploaded, in flight, or
    /// known-bad. Workers start lazily on the first request.
    pub fn request(&mut self, url: &str) {
        if self.textures.contains_key(url)
            || self.pending.contains(url)
            || self.failed.contains(url)
        {
            return;
        }
        self.ensure_workers();
        if let Some(tx) = &self.work_tx {
            if tx.send(url.to_string()).is_ok() {
                self.pending.insert(url.to_string());
            }
        }
    }

    /// Prefetch grid/list artwork for a freshly fetched result page.
    pub fn queue_summaries(&mut self, movies: &[MovieSummary]) {
        for m in movies {
            if let Some(url) = image_url(m.poster_path.as_deref(), ImageSize::W300) {
                self.request(&url);
            }
        }
    }

    /// Prefetch detail-page artwork: the backdrop full size, the poster as
    /// the fallback image.
    pub fn queue_details(&mut self, details: &MovieDetails) {
        if let Some(url) = image_url(details.backdrop_path.as_deref(), ImageSize::Original) {
            self.request(&url);
        }
        if let Some(url) = image_url(details.poster_path.as_deref(), ImageSize::W500) {
            self.request(&url);
        }
    }

    pub fn texture(&self, url: &str) -> Option<&TextureHandle> {
        self.textures.get(url)
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Drain completed downloads, uploading at most a handful of textures
    /// per frame so paint latency stays flat.
    pub fn poll(&mut self, ctx: &eg::Context) {
        let mut uploaded = 0usize;

        while uploaded < MAX_UPLOADS_PER_FRAME {
            let Some(rx) = &self.done_rx else { break };
            match rx.try_recv() {
                Ok(PosterMsg::Decoded {
                    url,
                    width,
                    height,
                    rgba,
                }) => {
                    let img = ColorImage::from_rgba_unmultiplied([width, height], &rgba);
                    let tex = ctx.load_texture(url.clone(), img, eg::TextureOptions::LINEAR);
                    self.pending.remove(&url);
                    self.textures.insert(url, tex);
                    uploaded += 1;
                }
                Ok(PosterMsg::Failed { url, error }) => {
                    warn!("artwork fetch failed: {url} — {error}");
                    self.pending.remove(&url);
                    self.failed.insert(url);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.done_rx = None;
                    break;
                }
            }
        }

        if uploaded > 0 {
            ctx.request_repaint();
        }
    }

    fn ensure_workers(&mut self) {
        if self.work_tx.is_some() {
            return;
        }

        let (work_tx, work_rx) = mpsc::channel::<String>();
        let (done_tx, done_rx) = mpsc::channel::<PosterMsg>();
        let work_rx = Arc::new(Mutex::new(work_rx));

        // One shared HTTP client across the pool.
        let client = match reqwest::blocking::Client::builder()
            .user_agent("mex/artwork")
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(WORKER_COUNT)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(ACCEPT, HeaderValue::from_static("image/*;q=0.9,*/*;q=0.5"));
                h
            })
            .build()
        {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!("artwork http client build failed: {e}");
                return;
            }
        };

        for _ in 0..WORKER_COUNT {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = {
                    let rx = work_rx.lock().unwrap();
                    rx.recv()
                };
                let url = match job {
                    Ok(u) => u,
                    Err(_) => break,
                };

                let msg = match fetch_and_decode(&client, &url) {
                    Ok((width, height, rgba)) => PosterMsg::Decoded {
                        url,
                        width,
                        height,
                        rgba,
                    },
                    Err(error) => PosterMsg::Failed { url, error },
                };
                let _ = done_tx.send(msg);
            });
        }

        self.work_tx = Some(work_tx);
        self.done_rx = Some(done_rx);
    }
}

fn fetch_and_decode(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<(usize, usize, Vec<u8>), String> {
    let resp = client.get(url).send().map_err(|e| e.to_string())?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status.as_u16()));
    }
    let bytes = resp.bytes().map_err(|e| e.to_string())?;

    let img = image::load_from_memory(&bytes).map_err(|e| format!("decode: {e}"))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w as usize, h as usize, rgba.into_raw()))
}
