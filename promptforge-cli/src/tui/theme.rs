pub static FORGE_LOGO: &str = r#"
  ███████╗ ██████╗ ██████╗  ██████╗ ███████╗
  ██╔════╝██╔═══██╗██╔══██╗██╔════╝ ██╔════╝
  █████╗  ██║   ██║██████╔╝██║  ███╗█████╗
  ██╔══╝  ██║   ██║██╔══██╗██║   ██║██╔══╝
  ██║     ╚██████╔╝██║  ██║╚██████╔╝███████╗
  ╚═╝      ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝
             prompt forge  -  version: 0.1.0
"#;

pub static FORGE_BLUE: (u8, u8, u8) = (59, 130, 246);
pub static FORGE_CYAN: (u8, u8, u8) = (148, 220, 239);
pub static FORGE_WHITE: (u8, u8, u8) = (200, 200, 200);

fn rgb_to_256_color(r: u8, g: u8, b: u8) -> u8 {
    let r_index = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_index = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_index = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + (36 * r_index) + (6 * g_index) + b_index
}

pub fn apply_gradient(text: &str, from_color: (u8, u8, u8), to_color: (u8, u8, u8)) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let max_width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();

    for line in lines {
        let chars: Vec<char> = line.chars().collect();
        for (col, &ch) in chars.iter().enumerate() {
            if ch.is_whitespace() {
                result.push(ch);
            } else {
                let position = if max_width <= 1 { 0.0 } else { col as f32 / (max_width - 1) as f32 };
                let r = (from_color.0 as f32 + (to_color.0 as f32 - from_color.0 as f32) * position) as u8;
                let g = (from_color.1 as f32 + (to_color.1 as f32 - from_color.1 as f32) * position) as u8;
                let b = (from_color.2 as f32 + (to_color.2 as f32 - from_color.2 as f32) * position) as u8;
                let color_256 = rgb_to_256_color(r, g, b);
                result.push_str(&format!("\x1b[38;5;{}m{}\x1b[0m", color_256, ch));
            }
        }
        result.push('\n');
    }

    result
}

pub fn logo() -> String {
    FORGE_LOGO.replace("\n", "\r\n")
}

pub fn logo_gradient() -> String {
    apply_gradient(FORGE_LOGO, FORGE_BLUE, FORGE_CYAN)
}
