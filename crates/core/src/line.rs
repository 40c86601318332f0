//! Utterance catalogue
//!
//! One `Line` per scripted sentence of the sales conversation. Lines are
//! read-only reference data: an identifier, the Spanish text, and an optional
//! pre-rendered audio asset key. The opening pitch additionally carries a
//! name-parametrized variant; a personalized line is unique per call and can
//! never be served from the static library.

use serde::{Deserialize, Serialize};

/// A logical line of scripted dialogue, independent of how it is rendered
/// to audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    /// Outbound opening pitch.
    OpeningPitch,
    /// Greeting for inbound calls.
    InboundGreeting,
    /// "¿Eres el titular del contrato de luz?"
    AskTitleholder,
    /// "¿Tienes la factura a mano?"
    AskInvoice,
    /// Successful close: send the bill over WhatsApp.
    Close,
    /// "¿A qué hora te llamamos?"
    AskCallbackTime,
    /// Generic goodbye after a rejection.
    Farewell,
    /// Goodbye when the caller is not the titleholder.
    FarewellTitleholder,
    /// Goodbye when the bill is not at hand.
    FarewellInvoice,
    /// Goodbye after agreeing a callback time.
    FarewellCallback,
    /// Goodbye falling back to WhatsApp.
    FarewellWhatsapp,
    /// Answer to "who are you".
    WhoWeAre,
    /// Answer to "how much does it cost".
    NoCost,
    /// Answer to "how does it work".
    HowItWorks,
    /// First-turn re-prompt when nothing matched.
    DidNotCatch,
    /// Mid-dialogue re-prompt when nothing matched.
    RepeatPlease,
    /// Silence re-prompt before hanging up.
    StillThere,
}

impl Line {
    /// The scripted Spanish text.
    pub fn text(&self) -> &'static str {
        match self {
            Line::OpeningPitch => {
                "¡Hola! Soy Cristina, del departamento de energía. Estoy entre reuniones \
                 y solo tengo treinta segundos. Te llamaba porque estamos ayudando a \
                 clientes a ahorrar cuarenta o cincuenta euros al mes en la luz. ¿Sería \
                 una locura ver si podemos hacer algo contigo, o lo descartamos?"
            }
            Line::InboundGreeting => {
                "Hola, gracias por llamar a Calidad Energía. Soy Cristina. ¿En qué puedo ayudarte?"
            }
            Line::AskTitleholder => "¿Eres el titular del contrato de luz?",
            Line::AskInvoice => "¿Tienes la factura a mano?",
            Line::Close => {
                "Perfecto. Te mando WhatsApp ahora, envíame foto de la factura y te digo \
                 cuánto puedes ahorrar. ¡Hasta luego!"
            }
            Line::AskCallbackTime => "Sin problema. ¿A qué hora te viene mejor que te llame?",
            Line::Farewell => "Vale, sin problema. ¡Hasta luego!",
            Line::FarewellTitleholder => "Vale, te mando WhatsApp para el titular. ¡Hasta luego!",
            Line::FarewellInvoice => {
                "Te mando WhatsApp y me la pasas cuando puedas. ¡Hasta luego!"
            }
            Line::FarewellCallback => "Perfecto, te llamo entonces. ¡Hasta luego!",
            Line::FarewellWhatsapp => {
                "Vale, te mando un WhatsApp y lo vemos por ahí. ¡Hasta luego!"
            }
            Line::WhoWeAre => {
                "Cristina, de Calidad Energía. Ayudamos a bajar la factura de la luz. \
                 ¿Eres el titular?"
            }
            Line::NoCost => {
                "Sí, es sin coste. Solo revisamos tu factura para ver si puedes ahorrar. \
                 ¿Eres el titular?"
            }
            Line::HowItWorks => {
                "Muy fácil. Me mandas foto de la factura por WhatsApp y te digo cuánto \
                 puedes ahorrar. ¿La tienes a mano?"
            }
            Line::DidNotCatch => "¿Perdona? No te he escuchado bien.",
            Line::RepeatPlease => "¿Me lo puedes repetir, por favor?",
            Line::StillThere => "¿Sigues ahí?",
        }
    }

    /// Key of the pre-rendered audio asset, when one was recorded offline.
    /// The most frequent, non-personalized lines are pre-rendered once to
    /// keep turn latency low; the rest go through synthesis.
    pub fn asset_key(&self) -> Option<&'static str> {
        match self {
            Line::OpeningPitch => Some("saludo"),
            Line::InboundGreeting => Some("incoming"),
            Line::AskTitleholder => Some("titular"),
            Line::AskInvoice => Some("factura"),
            Line::Close => Some("cierre"),
            Line::AskCallbackTime => Some("titular_hora"),
            Line::Farewell => Some("adios"),
            Line::FarewellTitleholder => Some("adios_titular"),
            Line::FarewellInvoice => Some("adios_factura"),
            Line::FarewellCallback => Some("adios_llamar"),
            Line::FarewellWhatsapp => Some("titular_whatsapp"),
            Line::WhoWeAre => Some("quien_soy"),
            Line::NoCost => Some("gratis"),
            Line::HowItWorks => Some("como_funciona"),
            Line::DidNotCatch => Some("no_entendi"),
            Line::RepeatPlease => Some("repite"),
            Line::StillThere => Some("sigues_ahi"),
        }
    }

    /// Name-parametrized variant of the line, when one exists. Only the
    /// opening pitch is personalized.
    pub fn personalized(&self, callee_name: &str) -> Option<String> {
        match self {
            Line::OpeningPitch => Some(format!(
                "¡Hola, {callee_name}! Soy Cristina, del departamento de energía. Estoy \
                 entre reuniones y solo tengo treinta segundos. Te llamaba porque estamos \
                 ayudando a clientes a ahorrar cuarenta o cincuenta euros al mes en la \
                 luz. ¿Sería una locura ver si podemos hacer algo contigo, o lo descartamos?"
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scripted_line_has_audio_or_text() {
        // Every line must be renderable one way or the other.
        for line in [Line::OpeningPitch, Line::Farewell, Line::StillThere] {
            assert!(!line.text().is_empty());
        }
    }

    #[test]
    fn only_the_pitch_is_personalized() {
        assert!(Line::OpeningPitch.personalized("Juan").is_some());
        assert!(Line::AskTitleholder.personalized("Juan").is_none());
        assert!(Line::Farewell.personalized("Juan").is_none());
    }

    #[test]
    fn personalized_pitch_carries_the_name() {
        let text = Line::OpeningPitch.personalized("Juan García").unwrap();
        assert!(text.contains("Juan García"));
    }
}
