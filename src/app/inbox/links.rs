//! mailto 与 WhatsApp 链接生成

use url::form_urlencoded::byte_serialize;

use super::model::{ContactForm, Message};

/// 回复 WhatsApp 时引用原消息的最大字符数
const QUOTE_LIMIT: usize = 50;

/// 按 URI 组件规则编码，空格编码为 `%20`
///
/// `byte_serialize` 把空格写成 `+`，字面量 `+` 则是 `%2B`，因此可以安全替换。
/// 它还会转义 `! ' ( ) ~`，这些字符在 URI 组件中保持原样。
/// 输出里的每个 `%` 都是转义序列的开头，按序列替换不会误伤。
fn encode_component(input: &str) -> String {
    const UNRESERVED: [(&str, &str); 5] = [
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
        ("%7E", "~"),
    ];

    let mut encoded = byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    for (escaped, literal) in UNRESERVED {
        encoded = encoded.replace(escaped, literal);
    }
    encoded
}

/// 只保留电话中的数字
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

pub fn whatsapp_url(phone: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone_digits(phone),
        encode_component(text)
    )
}

/// 客户从联系页直接发起 WhatsApp 对话
pub fn customer_whatsapp(company_phone: &str, form: &ContactForm, phone: &str) -> String {
    let text = format!(
        "Hola, mi nombre es {}. Email: {}. Teléfono: {}. Mensaje: {}",
        form.name, form.email, phone, form.message
    );
    whatsapp_url(company_phone, &text)
}

pub fn reply_mailto(company_name: &str, message: &Message) -> String {
    let subject = format!("RE: Consulta en {}", company_name);
    let body = format!(
        "Estimado/a {},\n\nGracias por su mensaje. En respuesta a su consulta:\n\n\"{}\"\n\nSaludos cordiales,\nEquipo de {}",
        message.name, message.message, company_name
    );
    format!(
        "mailto:{}?subject={}&body={}",
        message.email,
        encode_component(&subject),
        encode_component(&body)
    )
}

pub fn reply_whatsapp(company_name: &str, message: &Message) -> Option<String> {
    let phone = message.phone.as_deref()?;
    if phone_digits(phone).is_empty() {
        return None;
    }
    let text = format!(
        "Hola {}, gracias por contactarnos en {}. En respuesta a tu mensaje: \"{}\"",
        message.name,
        company_name,
        truncate_chars(&message.message, QUOTE_LIMIT)
    );
    Some(whatsapp_url(phone, &text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(phone: Option<&str>, text: &str) -> Message {
        Message {
            id: "9".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: phone.map(str::to_string),
            message: text.to_string(),
            date: Utc::now(),
            read: false,
        }
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("+54 9 351 274-2582"), "5493512742582");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b+c"), "a%20b%2Bc");
        assert_eq!(encode_component("Teléfono"), "Tel%C3%A9fono");
        assert_eq!(encode_component("¡Hola! (l'aceite) ~5*"), "%C2%A1Hola!%20(l'aceite)%20~5*");
        assert_eq!(encode_component("100%21"), "100%2521");
    }

    #[test]
    fn test_truncate_counts_chars() {
        let text = "ñ".repeat(60);
        let truncated = truncate_chars(&text, QUOTE_LIMIT);
        assert_eq!(truncated.chars().count(), QUOTE_LIMIT + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_chars("corto", QUOTE_LIMIT), "corto");
    }

    #[test]
    fn test_reply_links() {
        let msg = message(Some("(351) 555-0101"), "Hola");
        let mailto = reply_mailto("DistribuidoraRenata", &msg);
        assert!(mailto.starts_with("mailto:ana@example.com?subject=RE%3A%20Consulta%20en%20DistribuidoraRenata&body="));

        let whatsapp = reply_whatsapp("DistribuidoraRenata", &msg).unwrap();
        assert!(whatsapp.starts_with("https://wa.me/3515550101?text=Hola%20Ana"));

        assert_eq!(reply_whatsapp("DistribuidoraRenata", &message(None, "Hola")), None);
    }
}
