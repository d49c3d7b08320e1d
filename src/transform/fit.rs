use crate::foundation::core::PosRect;

/// How an avatar frame is mapped into a target rectangle of a different aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FitType {
    /// Scale inside the target preserving aspect ratio, centered.
    Contain,
    /// Crop the avatar to the target's aspect ratio from its origin, then fill the target.
    Cover,
    /// Stretch to the target, ignoring aspect ratio.
    #[default]
    Fill,
}

/// Result of fitting an avatar of a given size into a target rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitPlan {
    /// Region of the avatar to use, as `(width, height)` from its origin. `None` uses all of it.
    pub source_crop: Option<(u32, u32)>,
    /// Where the (possibly cropped) avatar is drawn.
    pub dest: PosRect,
}

/// Plan how an `avatar_w x avatar_h` frame maps into `target`.
///
/// Returns `None` when nothing would be drawn (empty target, empty avatar, or a cover crop that
/// collapses to zero pixels).
pub fn fit_into(fit: FitType, avatar_w: u32, avatar_h: u32, target: PosRect) -> Option<FitPlan> {
    if target.is_empty() || avatar_w == 0 || avatar_h == 0 {
        return None;
    }
    let (aw, ah) = (f64::from(avatar_w), f64::from(avatar_h));
    let (w, h) = (f64::from(target.w), f64::from(target.h));

    match fit {
        FitType::Fill => Some(FitPlan {
            source_crop: None,
            dest: target,
        }),
        FitType::Cover => {
            let ratio = (aw / w).min(ah / h);
            let cw = (w * ratio) as i64;
            let ch = (h * ratio) as i64;
            if cw <= 0 || ch <= 0 {
                return None;
            }
            let cw = cw.min(i64::from(avatar_w)) as u32;
            let ch = ch.min(i64::from(avatar_h)) as u32;
            Some(FitPlan {
                source_crop: Some((cw, ch)),
                dest: target,
            })
        }
        FitType::Contain => {
            let avatar_ratio = aw / ah;
            let target_ratio = w / h;
            let (rw, rh) = if avatar_ratio > target_ratio {
                (target.w, (w / avatar_ratio).round() as i32)
            } else {
                ((h * avatar_ratio).round() as i32, target.h)
            };
            if rw <= 0 || rh <= 0 {
                return None;
            }
            Some(FitPlan {
                source_crop: None,
                dest: PosRect::new(
                    target.x + (target.w - rw) / 2,
                    target.y + (target.h - rh) / 2,
                    rw,
                    rh,
                ),
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fit.rs"]
mod tests;
